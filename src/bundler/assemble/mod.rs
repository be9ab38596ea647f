//! XCFramework assembly strategies.
//!
//! Library evolution selects the strategy once per run, applied uniformly to
//! every platform: delegate the whole layout to
//! `xcodebuild -create-xcframework`, or reproduce the Carthage-style layout
//! by hand and write the manifest ourselves. The manual path exists because
//! the external tool unconditionally assumes library-evolution builds, which
//! some consumers must avoid.

pub mod manifest;

use crate::bundler::{
    archive::ArchiveArtifacts,
    error::{Error, Result},
    platform::Platform,
    settings::Settings,
    utils::fs,
};
use std::ffi::OsStr;
use std::path::Path;
use tokio::process::Command;

/// Fixed slice subdirectory holding the relevant BCSymbolMaps.
pub const SYMBOL_MAPS_DIR: &str = "BCSymbolMaps";

/// Fixed slice subdirectory holding the dSYM bundle.
pub const DEBUG_SYMBOLS_DIR: &str = "dSYMs";

/// Assembles the bundle directory from the accumulated per-platform
/// artifacts, in processing order.
pub async fn assemble(
    settings: &Settings,
    results: &[(Platform, ArchiveArtifacts)],
    bundle_path: &Path,
) -> Result<()> {
    if settings.enable_library_evolution() {
        delegate(results, bundle_path).await
    } else {
        layout(results, bundle_path).await?;
        manifest::write(settings, results, bundle_path)
    }
}

/// Delegates assembly to `xcodebuild -create-xcframework`.
///
/// The external tool produces the whole bundle including its manifest, so no
/// manifest step runs on this path.
async fn delegate(results: &[(Platform, ArchiveArtifacts)], bundle_path: &Path) -> Result<()> {
    log::info!(
        "Creating {} via xcodebuild -create-xcframework",
        bundle_path.display()
    );

    let mut command = Command::new("xcodebuild");
    command.arg("-create-xcframework");
    for (_, artifacts) in results {
        command.arg("-framework").arg(artifacts.framework());
        if let Some(dsym) = artifacts.dsym() {
            command.arg("-debug-symbols").arg(dsym);
        }
        for map in artifacts.symbol_maps() {
            command.arg("-debug-symbols").arg(map);
        }
    }
    command.arg("-allow-internal-distribution");
    command.arg("-output").arg(bundle_path);

    let output = command
        .output()
        .await
        .map_err(|source| Error::ToolUnavailable {
            tool: "xcodebuild",
            source,
        })?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool: "xcodebuild -create-xcframework",
            context: bundle_path.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}

/// Reproduces the Carthage-style bundle layout by hand.
///
/// Each platform gets a slice directory named by its library identifier,
/// holding the framework plus fixed BCSymbolMaps and dSYMs subdirectories.
async fn layout(results: &[(Platform, ArchiveArtifacts)], bundle_path: &Path) -> Result<()> {
    log::info!("Creating {} manually", bundle_path.display());

    for (platform, artifacts) in results {
        let slice_dir = bundle_path.join(platform.library_identifier());
        fs::create_dir_all(&slice_dir.join(SYMBOL_MAPS_DIR)).await?;
        fs::create_dir_all(&slice_dir.join(DEBUG_SYMBOLS_DIR)).await?;

        let framework = artifacts.framework();
        fs::copy_dir(framework, &slice_dir.join(base_name(framework)?)).await?;

        for map in artifacts.symbol_maps() {
            fs::copy_file(map, &slice_dir.join(SYMBOL_MAPS_DIR).join(base_name(map)?)).await?;
        }

        if let Some(dsym) = artifacts.dsym() {
            fs::copy_dir(dsym, &slice_dir.join(DEBUG_SYMBOLS_DIR).join(base_name(dsym)?)).await?;
        }
    }

    Ok(())
}

fn base_name(path: &Path) -> Result<&OsStr> {
    path.file_name()
        .ok_or_else(|| Error::GenericError(format!("{path:?} has no file name")))
}
