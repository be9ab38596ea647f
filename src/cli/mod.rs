//! Command line interface for the XCFramework bundler.

mod args;

pub use args::Args;

use crate::bundler::{Bundler, SettingsBuilder};
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let settings = settings_from(&args)?;

    let bundler = Bundler::new(settings);
    let destination = bundler.bundle().await?;
    log::info!("Created {}", destination.display());

    Ok(0)
}

/// Builds validated run settings from parsed arguments.
fn settings_from(args: &Args) -> Result<crate::bundler::Settings> {
    let mut builder = SettingsBuilder::new()
        .scheme(&args.scheme)
        .platforms(&args.platforms)
        .configuration(&args.configuration)
        .enable_library_evolution(args.enable_library_evolution)
        .enable_sk_assertions(args.enable_sk_assertions)
        .xcargs(args.xcargs.clone())
        .zip_destination(&args.zip_destination);

    if let Some(name) = &args.name {
        builder = builder.name(name);
    }
    if let Some(project) = &args.project {
        builder = builder.project(project);
    }
    if let Some(workspace) = &args.workspace {
        builder = builder.workspace(workspace);
    }
    if let Some(version) = &args.version {
        builder = builder.version(version);
    }
    if let Some(build_number) = &args.build_number {
        builder = builder.build_number(build_number);
    }

    Ok(builder.build().map_err(crate::bundler::Error::from)?)
}
