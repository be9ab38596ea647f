//! Main bundler orchestration and coordination.

use crate::bundler::{
    archive::{self, ArchiveArtifacts},
    assemble,
    error::{ErrorExt, Result},
    platform::{self, Platform},
    settings::Settings,
    utils::zip,
};
use std::path::PathBuf;

/// Main bundler orchestrator.
///
/// Platforms are processed strictly sequentially in request order, with
/// simulator variants interleaved after their parents; every platform shares
/// one run-scoped working directory, so per-platform steps never overlap.
/// Assembly only starts once every platform succeeded, and a failure anywhere
/// aborts the run with nothing written to the destination.
///
/// # Examples
///
/// ```no_run
/// use xcframework_bundler::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> xcframework_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .scheme("MyLib-{{platform}}")
///     .name("MyLib")
///     .platforms(&["iOS".to_string()])
///     .zip_destination("out/MyLib.xcframework.zip")
///     .build()?;
///
/// let destination = Bundler::new(settings).bundle().await?;
/// println!("Created {}", destination.display());
/// # Ok(())
/// # }
/// ```
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the full pipeline and returns the destination path of the zipped
    /// bundle.
    pub async fn bundle(&self) -> Result<PathBuf> {
        // Working area shared by every platform; dropped (and removed) on
        // every exit path, including failures below.
        let workspace = tempfile::tempdir()
            .fs_context("creating working directory", &std::env::temp_dir())?;

        let platforms = platform::expand(self.settings.platforms());
        let mut results: Vec<(Platform, ArchiveArtifacts)> =
            Vec::with_capacity(platforms.len());

        for platform in platforms {
            let archive_path = workspace
                .path()
                .join(platform.key())
                .join(format!("{}.xcarchive", self.settings.module_name()));

            archive::build::archive(&self.settings, platform, &archive_path).await?;
            archive::stamp::stamp_archive(
                &archive_path,
                self.settings.version(),
                self.settings.build_number(),
            )
            .await?;
            let artifacts = archive::symbols::collect(&archive_path, self.settings.module_name())?;
            results.push((platform, artifacts));
        }

        let bundle_name = format!("{}.xcframework", self.settings.module_name());
        let bundle_path = workspace.path().join(&bundle_name);
        log::info!("Creating {}", bundle_name);
        assemble::assemble(&self.settings, &results, &bundle_path).await?;

        log::info!("Zipping {}", bundle_name);
        zip::zip_dir(&bundle_path, self.settings.zip_destination(), true).await?;

        Ok(self.settings.zip_destination().to_path_buf())
    }
}
