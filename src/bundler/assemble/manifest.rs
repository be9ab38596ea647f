//! Bundle manifest generation for manually assembled XCFrameworks.
//!
//! The manifest must be indistinguishable from the one the external
//! bundle-creation tool writes: same keys, same constants, same omission
//! rules. Entry order follows platform processing order.

use crate::bundler::{
    archive::ArchiveArtifacts,
    error::Result,
    platform::Platform,
    settings::Settings,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container format tag carried by every XCFramework manifest.
pub const PACKAGE_TYPE: &str = "XFWK";

/// Manifest schema version this generator reproduces.
pub const FORMAT_VERSION: &str = "1.0";

/// One AvailableLibraries row describing a platform slice.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LibraryEntry {
    /// Present iff the slice carries at least one BCSymbolMap.
    #[serde(
        rename = "BitcodeSymbolMapsPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bitcode_symbol_maps_path: Option<String>,

    /// Always present, whether or not a dSYM was copied into the slice.
    #[serde(rename = "DebugSymbolsPath")]
    pub debug_symbols_path: String,

    /// Slice directory name, e.g. "ios-arm64_i386_x86_64-simulator".
    #[serde(rename = "LibraryIdentifier")]
    pub library_identifier: String,

    /// Framework bundle name inside the slice.
    #[serde(rename = "LibraryPath")]
    pub library_path: String,

    /// Architectures of the slice, in catalog order.
    #[serde(rename = "SupportedArchitectures")]
    pub supported_architectures: Vec<String>,

    /// Platform family name without a simulator qualifier.
    #[serde(rename = "SupportedPlatform")]
    pub supported_platform: String,

    /// "simulator" for simulator slices; absent otherwise.
    #[serde(
        rename = "SupportedPlatformVariant",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub supported_platform_variant: Option<String>,
}

/// Top-level Info.plist structure of an XCFramework.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct XcframeworkManifest {
    /// One entry per platform slice, in processing order.
    #[serde(rename = "AvailableLibraries")]
    pub available_libraries: Vec<LibraryEntry>,

    /// Always [`PACKAGE_TYPE`].
    #[serde(rename = "CFBundlePackageType")]
    pub package_type: String,

    /// Always [`FORMAT_VERSION`].
    #[serde(rename = "XCFrameworkFormatVersion")]
    pub format_version: String,
}

/// Builds the manifest from the accumulated results, preserving processing
/// order.
pub fn generate(
    settings: &Settings,
    results: &[(Platform, ArchiveArtifacts)],
) -> XcframeworkManifest {
    let available_libraries = results
        .iter()
        .map(|(platform, artifacts)| {
            let library_identifier = platform.library_identifier();
            // The variant is read back off the identifier, matching how
            // consumers interpret the slice directory name.
            let supported_platform_variant = library_identifier
                .ends_with("simulator")
                .then(|| "simulator".to_string());

            LibraryEntry {
                bitcode_symbol_maps_path: (!artifacts.symbol_maps().is_empty())
                    .then(|| super::SYMBOL_MAPS_DIR.to_string()),
                debug_symbols_path: super::DEBUG_SYMBOLS_DIR.to_string(),
                library_identifier,
                library_path: format!("{}.framework", settings.module_name()),
                supported_architectures: platform
                    .architectures()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                supported_platform: platform.supported_platform(),
                supported_platform_variant,
            }
        })
        .collect();

    XcframeworkManifest {
        available_libraries,
        package_type: PACKAGE_TYPE.to_string(),
        format_version: FORMAT_VERSION.to_string(),
    }
}

/// Writes the manifest as the bundle's Info.plist.
pub fn write(
    settings: &Settings,
    results: &[(Platform, ArchiveArtifacts)],
    bundle_path: &Path,
) -> Result<()> {
    let manifest = generate(settings, results);
    log::debug!(
        "Writing manifest with {} entries to {}",
        manifest.available_libraries.len(),
        bundle_path.display()
    );
    plist::to_file_xml(bundle_path.join("Info.plist"), &manifest)?;
    Ok(())
}
