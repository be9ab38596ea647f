//! External zip invocation for bundle packaging.

use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::{io, path::Path};
use tokio::process::Command;

/// Compresses a directory into an archive at `output`.
///
/// Runs zip from the source's parent so archive members are rooted at the
/// bundle name. With `preserve_symlinks`, links are stored as links instead
/// of being followed.
pub async fn zip_dir(source: &Path, output: &Path, preserve_symlinks: bool) -> Result<()> {
    let parent = source
        .parent()
        .ok_or_else(|| Error::GenericError(format!("{source:?} has no parent directory")))?;
    let name = source
        .file_name()
        .ok_or_else(|| Error::GenericError(format!("{source:?} has no file name")))?;

    if let Some(dest_dir) = output.parent() {
        tokio::fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }

    // zip appends into an existing archive; stale output must go first.
    match tokio::fs::remove_file(output).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(Error::Fs {
                action: "removing stale archive",
                path: output.to_path_buf(),
                source: e,
            });
        }
    }

    // The zip process runs from `parent`, so the output path must not be
    // interpreted relative to it.
    let output = output
        .absolutize()
        .fs_context("resolving output path", output)?;

    let mut command = Command::new("zip");
    command.current_dir(parent).arg("-r").arg("-q");
    if preserve_symlinks {
        command.arg("-y");
    }
    command.arg(output.as_os_str()).arg(name);

    let result = command
        .output()
        .await
        .map_err(|source| Error::ToolUnavailable { tool: "zip", source })?;

    if !result.status.success() {
        return Err(Error::ToolFailed {
            tool: "zip",
            context: source.display().to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        });
    }

    Ok(())
}
