//! Integration tests for the bundling pipeline.
//!
//! External tools (xcodebuild, PlistBuddy, zip) are not exercised here; the
//! pipeline is driven from artifact collection onward against fabricated
//! archives, and the CLI is checked for the validation failures that must
//! abort a run before any tool is invoked.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xcframework_bundler::bundler::{
    Platform, SettingsBuilder, archive::symbols, assemble,
    assemble::manifest::XcframeworkManifest,
};

/// Lays out a minimal xcarchive for `module`, mirroring the directory shape
/// xcodebuild produces: products under Products/, dSYMs and BCSymbolMaps at
/// the archive root.
fn fake_archive(root: &Path, module: &str, symbol_map: Option<&str>) -> PathBuf {
    let archive = root.join(format!("{module}.xcarchive"));
    let framework = archive
        .join("Products/Library/Frameworks")
        .join(format!("{module}.framework"));
    std::fs::create_dir_all(&framework).unwrap();
    std::fs::write(framework.join(module), b"\xcf\xfa\xed\xfe").unwrap();
    std::fs::write(framework.join("Info.plist"), b"<plist/>").unwrap();

    let dsym = archive.join("dSYMs").join(format!("{module}.framework.dSYM"));
    std::fs::create_dir_all(&dsym).unwrap();

    if let Some(name) = symbol_map {
        let maps = archive.join("BCSymbolMaps");
        std::fs::create_dir_all(&maps).unwrap();
        std::fs::write(
            maps.join(name),
            format!("__swift_FORCE_LOAD_$_swiftFoundation_$_{module}\n"),
        )
        .unwrap();
    }

    archive
}

#[tokio::test]
async fn manual_strategy_assembles_bundle_and_manifest() {
    let workspace = TempDir::new().unwrap();

    // One device archive with a symbol map, one simulator archive without.
    let device_archive = fake_archive(&workspace.path().join("iOS"), "Foo", Some("a.bcsymbolmap"));
    let simulator_archive = fake_archive(&workspace.path().join("iOSSimulator"), "Foo", None);

    let results = vec![
        (
            Platform::Ios,
            symbols::collect(&device_archive, "Foo").unwrap(),
        ),
        (
            Platform::IosSimulator,
            symbols::collect(&simulator_archive, "Foo").unwrap(),
        ),
    ];

    let settings = SettingsBuilder::new()
        .scheme("Foo")
        .platforms(&["iOS".to_string()])
        .enable_library_evolution(false)
        .zip_destination(workspace.path().join("Foo.xcframework.zip"))
        .build()
        .unwrap();

    let bundle = workspace.path().join("Foo.xcframework");
    assemble::assemble(&settings, &results, &bundle).await.unwrap();

    // Both slices hold a copied framework plus the fixed subdirectories.
    let device_slice = bundle.join("ios-arm64_armv7");
    assert!(device_slice.join("Foo.framework/Foo").is_file());
    assert!(device_slice.join("BCSymbolMaps/a.bcsymbolmap").is_file());
    assert!(device_slice.join("dSYMs/Foo.framework.dSYM").is_dir());

    let simulator_slice = bundle.join("ios-arm64_i386_x86_64-simulator");
    assert!(simulator_slice.join("Foo.framework/Foo").is_file());

    // The emitted manifest parses back with the expected entries.
    let manifest: XcframeworkManifest = plist::from_file(bundle.join("Info.plist")).unwrap();
    assert_eq!(manifest.package_type, "XFWK");
    assert_eq!(manifest.format_version, "1.0");
    assert_eq!(manifest.available_libraries.len(), 2);

    let device_entry = &manifest.available_libraries[0];
    assert_eq!(device_entry.library_identifier, "ios-arm64_armv7");
    assert_eq!(device_entry.library_path, "Foo.framework");
    assert_eq!(device_entry.supported_platform, "ios");
    assert_eq!(device_entry.supported_platform_variant, None);
    assert_eq!(device_entry.bitcode_symbol_maps_path.as_deref(), Some("BCSymbolMaps"));
    assert_eq!(device_entry.debug_symbols_path, "dSYMs");

    let simulator_entry = &manifest.available_libraries[1];
    assert_eq!(
        simulator_entry.library_identifier,
        "ios-arm64_i386_x86_64-simulator"
    );
    assert_eq!(simulator_entry.supported_platform, "ios");
    assert_eq!(
        simulator_entry.supported_platform_variant.as_deref(),
        Some("simulator")
    );
    assert_eq!(simulator_entry.bitcode_symbol_maps_path, None);
    assert_eq!(simulator_entry.debug_symbols_path, "dSYMs");
}

#[tokio::test]
async fn extraction_fails_before_assembly_when_framework_is_missing() {
    let workspace = TempDir::new().unwrap();
    let archive = fake_archive(&workspace.path().join("iOS"), "Bar", None);

    let result = symbols::collect(&archive, "Foo");
    let message = result.unwrap_err().to_string();
    assert!(message.contains("no Foo.framework found"));
    assert!(message.contains("Bar.xcarchive"));
}

#[test]
fn cli_rejects_conflicting_project_and_workspace() {
    Command::cargo_bin("xcframework_bundler")
        .unwrap()
        .args([
            "--scheme",
            "Foo",
            "--platforms",
            "iOS",
            "--project",
            "App.xcodeproj",
            "--workspace",
            "App.xcworkspace",
            "--zip-destination",
            "out.zip",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "only one of project and workspace",
        ));
}

#[test]
fn cli_rejects_unknown_platform() {
    Command::cargo_bin("xcframework_bundler")
        .unwrap()
        .args([
            "--scheme",
            "Foo",
            "--platforms",
            "iOS,android",
            "--zip-destination",
            "out.zip",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown platform \"android\""));
}

#[test]
fn cli_rejects_invalid_configuration() {
    Command::cargo_bin("xcframework_bundler")
        .unwrap()
        .args([
            "--scheme",
            "Foo",
            "--platforms",
            "iOS",
            "--configuration",
            "Profile",
            "--zip-destination",
            "out.zip",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn cli_rejects_missing_project_path() {
    Command::cargo_bin("xcframework_bundler")
        .unwrap()
        .args([
            "--scheme",
            "Foo",
            "--platforms",
            "iOS",
            "--project",
            "/definitely/not/here/App.xcodeproj",
            "--zip-destination",
            "out.zip",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found"));
}
