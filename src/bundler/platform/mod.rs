//! Platform catalog for Apple SDK targets.
//!
//! One static descriptor table drives every per-platform lookup: archive
//! destination, supported architectures, scheme-name substitution and the
//! library identifier naming the platform's slice inside a bundle. All
//! operations read the same table, so a platform is spelled exactly once.

use crate::bundler::error::ValidationError;
use std::fmt;

/// Placeholder substituted with a platform's display name in scheme names.
pub const SCHEME_PLATFORM_PLACEHOLDER: &str = "{{platform}}";

/// An Apple SDK target a framework slice can be built for.
///
/// Simulator variants cannot be requested directly; they are interleaved by
/// [`expand`] right after their parent platform.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// CarPlay devices
    CarPlayOs,
    /// CarPlay simulator
    CarPlayOsSimulator,
    /// iPhone and iPod touch devices
    Ios,
    /// iOS simulator
    IosSimulator,
    /// iPad devices
    IpadOs,
    /// iPadOS simulator
    IpadOsSimulator,
    /// Mac hardware
    MacOs,
    /// iPad apps running on macOS
    MacOsCatalyst,
    /// Apple TV devices
    TvOs,
    /// tvOS simulator
    TvOsSimulator,
    /// Apple Watch devices
    WatchOs,
    /// watchOS simulator
    WatchOsSimulator,
}

/// Catalog row describing one SDK target.
struct Descriptor {
    platform: Platform,
    /// SDK key as spelled in requests and slice identifiers, e.g. "iOSSimulator".
    key: &'static str,
    /// `xcodebuild -destination` selector.
    destination: &'static str,
    /// Architectures baked into the library identifier, in catalog order.
    ///
    /// Rows carrying the single placeholder value "undefined" have no
    /// resolved architecture set; the identifier embeds the placeholder.
    architectures: &'static [&'static str],
    /// Name substituted for the scheme placeholder.
    display_name: &'static str,
    /// Simulator counterpart emitted right after this platform on expansion.
    simulator: Option<Platform>,
}

/// Rows are indexed by enum discriminant; keep both orders in sync.
const CATALOG: &[Descriptor] = &[
    Descriptor {
        platform: Platform::CarPlayOs,
        key: "carPlayOS",
        destination: "generic/platform=carPlayOS",
        architectures: &["undefined"],
        display_name: "carPlayOS",
        simulator: Some(Platform::CarPlayOsSimulator),
    },
    Descriptor {
        platform: Platform::CarPlayOsSimulator,
        key: "carPlayOSSimulator",
        destination: "generic/platform=carPlayOS Simulator",
        architectures: &["undefined"],
        display_name: "carPlayOS",
        simulator: None,
    },
    Descriptor {
        platform: Platform::Ios,
        key: "iOS",
        destination: "generic/platform=iOS",
        architectures: &["arm64", "armv7"],
        display_name: "iOS",
        simulator: Some(Platform::IosSimulator),
    },
    Descriptor {
        platform: Platform::IosSimulator,
        key: "iOSSimulator",
        destination: "generic/platform=iOS Simulator",
        architectures: &["arm64", "i386", "x86_64"],
        display_name: "iOS",
        simulator: None,
    },
    Descriptor {
        platform: Platform::IpadOs,
        key: "iPadOS",
        destination: "generic/platform=iPadOS",
        architectures: &["undefined"],
        display_name: "iPadOS",
        simulator: Some(Platform::IpadOsSimulator),
    },
    Descriptor {
        platform: Platform::IpadOsSimulator,
        key: "iPadOSSimulator",
        destination: "generic/platform=iPadOS Simulator",
        architectures: &["undefined"],
        display_name: "iPadOS",
        simulator: None,
    },
    Descriptor {
        platform: Platform::MacOs,
        key: "macOS",
        destination: "generic/platform=macOS",
        architectures: &["arm64", "x86_64"],
        display_name: "macOS",
        simulator: None,
    },
    Descriptor {
        platform: Platform::MacOsCatalyst,
        key: "macOSCatalyst",
        destination: "generic/platform=macOS,variant=Mac Catalyst",
        architectures: &["undefined"],
        display_name: "Catalyst",
        simulator: None,
    },
    Descriptor {
        platform: Platform::TvOs,
        key: "tvOS",
        destination: "generic/platform=tvOS",
        architectures: &["arm64"],
        display_name: "tvOS",
        simulator: Some(Platform::TvOsSimulator),
    },
    Descriptor {
        platform: Platform::TvOsSimulator,
        key: "tvOSSimulator",
        destination: "generic/platform=tvOS Simulator",
        architectures: &["arm64", "x86_64"],
        display_name: "tvOS",
        simulator: None,
    },
    Descriptor {
        platform: Platform::WatchOs,
        key: "watchOS",
        destination: "generic/platform=watchOS",
        architectures: &["arm64_32", "armv7k"],
        display_name: "watchOS",
        simulator: Some(Platform::WatchOsSimulator),
    },
    Descriptor {
        platform: Platform::WatchOsSimulator,
        key: "watchOSSimulator",
        destination: "generic/platform=watchOS Simulator",
        architectures: &["arm64", "i386", "x86_64"],
        display_name: "watchOS",
        simulator: None,
    },
];

/// Platforms accepted in a request.
const REQUESTABLE: &[Platform] = &[
    Platform::CarPlayOs,
    Platform::Ios,
    Platform::IpadOs,
    Platform::MacOsCatalyst,
    Platform::MacOs,
    Platform::TvOs,
    Platform::WatchOs,
];

impl Platform {
    /// Parses a requested platform name (e.g. "iOS", "watchOS").
    pub fn parse(value: &str) -> std::result::Result<Self, ValidationError> {
        REQUESTABLE
            .iter()
            .copied()
            .find(|platform| platform.key() == value)
            .ok_or_else(|| ValidationError::UnknownPlatform {
                value: value.to_string(),
                expected: REQUESTABLE
                    .iter()
                    .map(|platform| platform.key())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    fn descriptor(self) -> &'static Descriptor {
        let descriptor = &CATALOG[self as usize];
        debug_assert_eq!(descriptor.platform, self);
        descriptor
    }

    /// Returns the SDK key, e.g. "iOSSimulator".
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Returns the `xcodebuild -destination` selector for this platform.
    pub fn destination(self) -> &'static str {
        self.descriptor().destination
    }

    /// Returns the supported architectures, in catalog order.
    pub fn architectures(self) -> &'static [&'static str] {
        self.descriptor().architectures
    }

    /// Returns the simulator counterpart, if the platform family has one.
    pub fn simulator(self) -> Option<Platform> {
        self.descriptor().simulator
    }

    /// Whether this platform is a simulator variant.
    pub fn is_simulator(self) -> bool {
        self.key().ends_with("Simulator")
    }

    /// Returns the identifier naming this platform's slice inside a bundle.
    ///
    /// Built from the lowercased key without its simulator qualifier, the
    /// `_`-joined architecture list, and a trailing "simulator" when the
    /// qualifier was stripped, all joined with hyphens:
    /// `ios-arm64_i386_x86_64-simulator`.
    pub fn library_identifier(self) -> String {
        let descriptor = self.descriptor();
        let base = descriptor
            .key
            .strip_suffix("Simulator")
            .unwrap_or(descriptor.key)
            .to_lowercase();

        let mut components = vec![base, descriptor.architectures.join("_")];
        if self.is_simulator() {
            components.push("simulator".to_string());
        }
        components.join("-")
    }

    /// Returns the platform name as spelled in manifest SupportedPlatform
    /// fields: the lowercased key without a "simulator" suffix.
    pub fn supported_platform(self) -> String {
        let lowered = self.key().to_lowercase();
        lowered
            .strip_suffix("simulator")
            .unwrap_or(&lowered)
            .to_string()
    }

    /// Substitutes the scheme placeholder with this platform's display name.
    ///
    /// Simulator variants substitute their parent's name; macOSCatalyst
    /// substitutes "Catalyst". Schemes without the placeholder pass through
    /// unchanged.
    pub fn scheme_name(self, base_scheme: &str) -> String {
        base_scheme.replace(SCHEME_PLATFORM_PLACEHOLDER, self.descriptor().display_name)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Expands requested platforms into the processing list.
///
/// Each platform is emitted in request order, immediately followed by its
/// simulator variant when the family defines one. The result is never
/// re-sorted.
pub fn expand(requested: &[Platform]) -> Vec<Platform> {
    let mut expanded = Vec::with_capacity(requested.len() * 2);
    for &platform in requested {
        expanded.push(platform);
        if let Some(simulator) = platform.simulator() {
            expanded.push(simulator);
        }
    }
    expanded
}
