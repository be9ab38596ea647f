//! Command line argument parsing.
//!
//! Argument-level parsing only; cross-field validation (conflicting
//! containers, platform and configuration names, path shapes) lives in
//! [`SettingsBuilder::build`](crate::bundler::SettingsBuilder::build) so it
//! runs before any external tool is invoked.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Multi-platform XCFramework bundler
#[derive(Parser, Debug)]
#[command(
    name = "xcframework_bundler",
    disable_version_flag = true,
    about = "Creates an XCFramework with dSYMs and BCSymbolMaps",
    long_about = "Archives a scheme for every requested Apple platform (simulator variants \
included automatically), stamps version metadata, collects frameworks, dSYMs and \
BCSymbolMaps, assembles an XCFramework and zips it to the requested destination.

Usage:
  xcframework_bundler --scheme MyLib --platforms iOS,watchOS --zip-destination out/MyLib.zip
  xcframework_bundler --scheme 'MyLib-{{platform}}' --name MyLib --platforms iOS \\
      --workspace App.xcworkspace --version 2.5.0 --build-number 117 \\
      --enable-library-evolution false --zip-destination out/MyLib.zip

Exit code 0 = zipped bundle guaranteed to exist at the destination path."
)]
pub struct Args {
    /// Base name of the scheme to build; a "{{platform}}" placeholder expands
    /// to the platform display name
    #[arg(short, long, value_name = "SCHEME")]
    pub scheme: String,

    /// The module name, if different than the scheme
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Platforms to include in the XCFramework (e.g. "iOS,watchOS")
    #[arg(short, long, value_name = "PLATFORMS", value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// The build configuration (Debug | Release)
    #[arg(short, long, default_value = "Release", value_name = "CONFIGURATION")]
    pub configuration: String,

    /// The project containing the scheme to be built
    #[arg(long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// The workspace containing the scheme to be built
    #[arg(long, value_name = "PATH")]
    pub workspace: Option<PathBuf>,

    /// The release version stamped into each product's Info.plist
    #[arg(long, env = "RELEASE_VERSION", value_name = "VERSION")]
    pub version: Option<String>,

    /// The build number stamped into each product's Info.plist
    #[arg(short, long, env = "BUILD_NUMBER", value_name = "NUMBER")]
    pub build_number: Option<String>,

    /// Whether to enable library evolution mode
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        value_name = "BOOL"
    )]
    pub enable_library_evolution: bool,

    /// Whether to enable skAssertions
    #[arg(
        long = "enable-sk-assertions",
        default_value_t = false,
        action = ArgAction::Set,
        value_name = "BOOL"
    )]
    pub enable_sk_assertions: bool,

    /// Any additional xcodebuild options (repeatable)
    #[arg(long = "xcarg", value_name = "FLAG")]
    pub xcargs: Vec<String>,

    /// The path where the XCFramework zip archive should be placed
    #[arg(short = 'o', long, value_name = "PATH")]
    pub zip_destination: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn platforms_split_on_commas() {
        let args = Args::parse_from([
            "xcframework_bundler",
            "--scheme",
            "MyLib",
            "--platforms",
            "iOS,watchOS",
            "--zip-destination",
            "out.zip",
        ]);
        assert_eq!(args.platforms, vec!["iOS", "watchOS"]);
        assert_eq!(args.configuration, "Release");
        assert!(args.enable_library_evolution);
        assert!(!args.enable_sk_assertions);
    }

    #[test]
    fn evolution_flag_accepts_explicit_false() {
        let args = Args::parse_from([
            "xcframework_bundler",
            "--scheme",
            "MyLib",
            "--platforms",
            "iOS",
            "--enable-library-evolution",
            "false",
            "--zip-destination",
            "out.zip",
        ]);
        assert!(!args.enable_library_evolution);
    }

    #[test]
    fn xcargs_accumulate_in_order() {
        let args = Args::parse_from([
            "xcframework_bundler",
            "--scheme",
            "MyLib",
            "--platforms",
            "iOS",
            "--xcarg",
            "A=1",
            "--xcarg",
            "B=2",
            "--zip-destination",
            "out.zip",
        ]);
        assert_eq!(args.xcargs, vec!["A=1", "B=2"]);
    }
}
