//! Core Settings struct and accessors.

use crate::bundler::error::ValidationError;
use crate::bundler::platform::Platform;
use std::path::{Path, PathBuf};

/// Build configuration passed to the archive tool.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Configuration {
    /// Unoptimized build with debug assertions
    Debug,
    /// Optimized release build
    #[default]
    Release,
}

impl Configuration {
    /// Parses a configuration name ("Debug" or "Release").
    pub fn parse(value: &str) -> std::result::Result<Self, ValidationError> {
        match value {
            "Debug" => Ok(Self::Debug),
            "Release" => Ok(Self::Release),
            _ => Err(ValidationError::InvalidConfiguration {
                value: value.to_string(),
            }),
        }
    }

    /// Returns the configuration name as passed to the archive tool.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }
}

/// Source container holding the scheme to be archived.
#[derive(Clone, Debug)]
pub enum ProjectKind {
    /// An .xcodeproj bundle
    Project(PathBuf),
    /// An .xcworkspace bundle
    Workspace(PathBuf),
}

/// Validated settings for one bundling run.
///
/// Constructed via [`SettingsBuilder`]; immutable afterwards. Every field is
/// checked before the first external tool runs, so a run that starts
/// archiving can no longer fail on configuration.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Base scheme name, possibly carrying the platform placeholder.
    pub(super) scheme: String,

    /// Module name: the framework and bundle are named after it.
    pub(super) module_name: String,

    /// Requested platforms, in request order, before simulator expansion.
    pub(super) platforms: Vec<Platform>,

    /// Build configuration.
    pub(super) configuration: Configuration,

    /// Project or workspace containing the scheme, if supplied.
    pub(super) source: Option<ProjectKind>,

    /// Release version stamped into archived products.
    pub(super) version: Option<String>,

    /// Build number stamped into archived products.
    pub(super) build_number: Option<String>,

    /// Selects the assembly strategy: delegate when enabled, manual otherwise.
    pub(super) enable_library_evolution: bool,

    /// Passes the assertion-enabling flag to the archive build.
    pub(super) enable_sk_assertions: bool,

    /// Caller-supplied extra build flags, appended after the fixed set.
    pub(super) xcargs: Vec<String>,

    /// Path the zipped bundle is written to.
    pub(super) zip_destination: PathBuf,
}

impl Settings {
    /// Returns the base scheme name.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the module name the framework is expected to carry.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Returns the requested platforms in request order.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Returns the build configuration.
    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    /// Returns the project or workspace containing the scheme.
    pub fn source(&self) -> Option<&ProjectKind> {
        self.source.as_ref()
    }

    /// Returns the release version to stamp, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the build number to stamp, if any.
    pub fn build_number(&self) -> Option<&str> {
        self.build_number.as_deref()
    }

    /// Whether library evolution is enabled for this run.
    ///
    /// Enabled runs delegate assembly to the external bundle-creation tool;
    /// disabled runs lay the bundle out manually.
    pub fn enable_library_evolution(&self) -> bool {
        self.enable_library_evolution
    }

    /// Returns the destination path for the zipped bundle.
    pub fn zip_destination(&self) -> &Path {
        &self.zip_destination
    }

    /// Returns the ordered build flags for the archive step.
    ///
    /// Fixed flags first, conditional flags next, caller-supplied extras
    /// last. Whether later flags override earlier duplicates is the archive
    /// tool's contract.
    pub fn build_flags(&self) -> Vec<String> {
        let mut flags = vec![
            "BITCODE_GENERATION_MODE=bitcode".to_string(),
            "DEBUG_INFORMATION_FORMAT=dwarf-with-dsym".to_string(),
            "ENABLE_BITCODE=YES".to_string(),
            "SKIP_INSTALL=NO".to_string(),
        ];
        if self.enable_library_evolution {
            flags.push("BUILD_LIBRARY_FOR_DISTRIBUTION=YES".to_string());
        }
        if self.enable_sk_assertions {
            flags.push("ENABLE_SK_ASSERT=\"-D ENABLE_SK_ASSERT\"".to_string());
        }
        flags.extend(self.xcargs.iter().cloned());
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;

    fn base_builder() -> SettingsBuilder {
        SettingsBuilder::new()
            .scheme("MyLib")
            .platforms(&["iOS".to_string()])
            .zip_destination("out/MyLib.xcframework.zip")
    }

    #[test]
    fn configuration_parses_debug_and_release_only() {
        assert_eq!(Configuration::parse("Debug").ok(), Some(Configuration::Debug));
        assert_eq!(Configuration::parse("Release").ok(), Some(Configuration::Release));
        assert!(Configuration::parse("Profile").is_err());
        assert!(Configuration::parse("release").is_err());
    }

    #[test]
    fn build_flags_start_with_fixed_set() {
        let settings = base_builder().build().unwrap();
        let flags = settings.build_flags();
        assert_eq!(
            &flags[..4],
            &[
                "BITCODE_GENERATION_MODE=bitcode",
                "DEBUG_INFORMATION_FORMAT=dwarf-with-dsym",
                "ENABLE_BITCODE=YES",
                "SKIP_INSTALL=NO",
            ]
        );
    }

    #[test]
    fn build_flags_add_distribution_flag_with_evolution() {
        let settings = base_builder().enable_library_evolution(true).build().unwrap();
        assert!(
            settings
                .build_flags()
                .contains(&"BUILD_LIBRARY_FOR_DISTRIBUTION=YES".to_string())
        );

        let settings = base_builder().enable_library_evolution(false).build().unwrap();
        assert!(
            !settings
                .build_flags()
                .contains(&"BUILD_LIBRARY_FOR_DISTRIBUTION=YES".to_string())
        );
    }

    #[test]
    fn build_flags_append_caller_extras_last() {
        let settings = base_builder()
            .enable_sk_assertions(true)
            .xcargs(vec!["OTHER_SWIFT_FLAGS=-DFOO".to_string()])
            .build()
            .unwrap();
        let flags = settings.build_flags();
        assert_eq!(flags.last().map(String::as_str), Some("OTHER_SWIFT_FLAGS=-DFOO"));
        assert!(flags.contains(&"ENABLE_SK_ASSERT=\"-D ENABLE_SK_ASSERT\"".to_string()));
    }
}
