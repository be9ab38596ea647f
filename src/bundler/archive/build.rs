//! External archive build invocation.
//!
//! No compilation logic lives here; this module only assembles the
//! `xcodebuild` argument list for one platform and maps failures.

use crate::bundler::{
    error::{Error, Result},
    platform::Platform,
    settings::{ProjectKind, Settings},
    utils::fs,
};
use std::path::Path;
use tokio::process::Command;

/// Archives the scheme for one platform into `archive_path`.
///
/// Prior output at the path is discarded first, so a failed earlier run can
/// never leak stale products into this one.
pub async fn archive(
    settings: &Settings,
    platform: Platform,
    archive_path: &Path,
) -> Result<()> {
    fs::remove_dir_all(archive_path).await?;

    let scheme = platform.scheme_name(settings.scheme());
    log::info!("Archiving {} for {}", scheme, platform);

    let mut command = Command::new("xcodebuild");
    command
        .arg("clean")
        .arg("archive")
        .args(["-scheme", &scheme])
        .args(["-configuration", settings.configuration().as_str()])
        .args(["-destination", platform.destination()]);

    match settings.source() {
        Some(ProjectKind::Project(path)) => {
            command.arg("-project").arg(path);
        }
        Some(ProjectKind::Workspace(path)) => {
            command.arg("-workspace").arg(path);
        }
        None => {}
    }

    command.arg("-archivePath").arg(archive_path);
    command.args(settings.build_flags());

    let output = command
        .output()
        .await
        .map_err(|source| Error::ToolUnavailable {
            tool: "xcodebuild",
            source,
        })?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool: "xcodebuild archive",
            context: format!("{scheme} ({platform})"),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    log::debug!("Archived {} to {}", scheme, archive_path.display());
    Ok(())
}
