//! Version and build number stamping for archived products.
//!
//! Every product Info.plist under an archive is edited through PlistBuddy.
//! A Set on a key the file does not carry yet falls back to Add; any other
//! edit failure aborts the run.

use crate::bundler::error::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::process::Command;

const PLISTBUDDY: &str = "/usr/libexec/PlistBuddy";

const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
const BUILD_NUMBER_KEY: &str = "CFBundleVersion";

/// Grouping for release versions: major.minor.(patch|*) with optional
/// prerelease and build-metadata suffixes.
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.)(\d+\.)(\*|\d+)(-[^+\s]+)?(\+\S+)?")
        .expect("version grouping is a valid pattern")
});

/// Outcome of a primary Set attempt on a metadata key.
#[derive(Debug, Eq, PartialEq)]
enum SetOutcome {
    /// The key existed and was updated.
    Applied,
    /// The key is not present in the file; an Add must follow.
    KeyAbsent,
}

/// Normalizes a release version to its stored short-version form.
///
/// Keeps major.minor.(patch|*) and any -prerelease suffix. Build metadata
/// after `+` is part of the grouping so the prerelease group cannot absorb
/// it, but is dropped from the stored value: `2.5.0-beta+001` stamps
/// `2.5.0-beta`.
pub fn normalize_version(value: &str) -> Result<String> {
    let captures = VERSION_PATTERN
        .captures(value)
        .ok_or_else(|| Error::InvalidVersion {
            value: value.to_string(),
        })?;

    let mut normalized = String::new();
    for group in 1..=4 {
        if let Some(matched) = captures.get(group) {
            normalized.push_str(matched.as_str());
        }
    }
    Ok(normalized)
}

/// Stamps the release version and build number into every product
/// Info.plist under the archive.
///
/// The version is normalized (and rejected) before any file is touched, so
/// a bad value can never leave an archive partially stamped.
pub async fn stamp_archive(
    archive_path: &Path,
    version: Option<&str>,
    build_number: Option<&str>,
) -> Result<()> {
    if version.is_none() && build_number.is_none() {
        return Ok(());
    }

    let version = version.map(normalize_version).transpose()?;

    for plist_path in product_plists(archive_path) {
        if let Some(version) = &version {
            log::info!("Setting version {:?} in {}", version, plist_path.display());
            stamp_key(&plist_path, SHORT_VERSION_KEY, version).await?;
        }
        if let Some(build_number) = build_number {
            log::info!(
                "Setting build number {:?} in {}",
                build_number,
                plist_path.display()
            );
            stamp_key(&plist_path, BUILD_NUMBER_KEY, build_number).await?;
        }
    }

    Ok(())
}

/// Every Info.plist under the archive's Products tree, in walk order.
fn product_plists(archive_path: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(archive_path.join("Products"))
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == "Info.plist")
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Applies the set-then-add edit policy for one key.
async fn stamp_key(path: &Path, key: &str, value: &str) -> Result<()> {
    match try_set(path, key, value).await? {
        SetOutcome::Applied => Ok(()),
        SetOutcome::KeyAbsent => add_string(path, key, value).await,
    }
}

/// Attempts to Set an existing key, classifying a missing key separately
/// from every other failure.
async fn try_set(path: &Path, key: &str, value: &str) -> Result<SetOutcome> {
    let output = plistbuddy(path, &format!("Set :{key} {value}")).await?;
    if output.status.success() {
        return Ok(SetOutcome::Applied);
    }

    // PlistBuddy reports a missing key as `Set: Entry, ":Key", Does Not
    // Exist` on its output streams.
    let report = combined_output(&output);
    if report.contains("Does Not Exist") {
        return Ok(SetOutcome::KeyAbsent);
    }

    Err(Error::MetadataEdit {
        operation: "set",
        key: key.to_string(),
        path: path.to_path_buf(),
        reason: report.trim().to_string(),
    })
}

/// Adds a key as a string entry; any failure here is fatal.
async fn add_string(path: &Path, key: &str, value: &str) -> Result<()> {
    let output = plistbuddy(path, &format!("Add :{key} string {value}")).await?;
    if output.status.success() {
        return Ok(());
    }

    Err(Error::MetadataEdit {
        operation: "add",
        key: key.to_string(),
        path: path.to_path_buf(),
        reason: combined_output(&output).trim().to_string(),
    })
}

async fn plistbuddy(path: &Path, directive: &str) -> Result<std::process::Output> {
    Command::new(PLISTBUDDY)
        .arg("-c")
        .arg(directive)
        .arg(path)
        .output()
        .await
        .map_err(|source| Error::ToolUnavailable {
            tool: "PlistBuddy",
            source,
        })
}

fn combined_output(output: &std::process::Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}
