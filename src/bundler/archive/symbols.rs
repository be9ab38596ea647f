//! Framework, dSYM and BCSymbolMap discovery inside one archive.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Marker prefix identifying BCSymbolMaps produced for a given module.
///
/// An archive's BCSymbolMaps directory also holds maps for statically linked
/// dependencies; only maps mentioning the module's force-load marker belong
/// in the bundle.
const SYMBOL_MAP_MARKER_PREFIX: &str = "__swift_FORCE_LOAD_$_swiftFoundation_$_";

/// Subdirectory of an archive holding its BCSymbolMap files.
const SYMBOL_MAPS_SUBDIR: &str = "BCSymbolMaps";

/// Artifacts collected from one platform's archive.
///
/// Produced once per platform and read by the assembler; never mutated after
/// collection.
#[derive(Clone, Debug)]
pub struct ArchiveArtifacts {
    framework: PathBuf,
    dsym: Option<PathBuf>,
    symbol_maps: Vec<PathBuf>,
}

impl ArchiveArtifacts {
    /// Returns the path of the archived framework bundle.
    pub fn framework(&self) -> &Path {
        &self.framework
    }

    /// Returns the path of the archived dSYM bundle, if one was produced.
    pub fn dsym(&self) -> Option<&Path> {
        self.dsym.as_deref()
    }

    /// Returns the module-relevant BCSymbolMap files, in file-name order.
    pub fn symbol_maps(&self) -> &[PathBuf] {
        &self.symbol_maps
    }

    #[cfg(test)]
    pub(crate) fn for_tests(
        framework: PathBuf,
        dsym: Option<PathBuf>,
        symbol_maps: Vec<PathBuf>,
    ) -> Self {
        Self {
            framework,
            dsym,
            symbol_maps,
        }
    }
}

/// Collects the framework, optional dSYM and module-relevant BCSymbolMaps
/// from one archive.
///
/// Fails with [`Error::FrameworkNotFound`] when the archive holds no
/// framework named after the module; nothing else is looked up in that case.
pub fn collect(archive_path: &Path, module_name: &str) -> Result<ArchiveArtifacts> {
    let framework = find_bundle(archive_path, &format!("{module_name}.framework")).ok_or_else(
        || Error::FrameworkNotFound {
            name: module_name.to_string(),
            path: archive_path.to_path_buf(),
        },
    )?;
    log::debug!("Found framework {}", framework.display());

    let dsym = find_bundle(archive_path, &format!("{module_name}.framework.dSYM"));
    if dsym.is_none() {
        log::debug!("No dSYM for {} in {}", module_name, archive_path.display());
    }

    let symbol_maps = relevant_symbol_maps(archive_path, module_name)?;

    Ok(ArchiveArtifacts {
        framework,
        dsym,
        symbol_maps,
    })
}

/// Finds the first entry named `bundle_name` anywhere under `root`, in
/// file-name walk order.
fn find_bundle(root: &Path, bundle_name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .find(|entry| entry.file_name().to_string_lossy() == bundle_name)
        .map(walkdir::DirEntry::into_path)
}

/// Returns the BCSymbolMap files whose content mentions the module's
/// force-load marker, in file-name order.
fn relevant_symbol_maps(archive_path: &Path, module_name: &str) -> Result<Vec<PathBuf>> {
    let maps_dir = archive_path.join(SYMBOL_MAPS_SUBDIR);
    if !maps_dir.is_dir() {
        return Ok(Vec::new());
    }

    let marker = format!("{SYMBOL_MAP_MARKER_PREFIX}{module_name}");
    let mut symbol_maps = Vec::new();

    let entries = std::fs::read_dir(&maps_dir).fs_context("reading symbol maps", &maps_dir)?;
    for entry in entries {
        let entry = entry.fs_context("reading symbol maps", &maps_dir)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&path).fs_context("reading symbol map", &path)?;
        if content.contains(&marker) {
            symbol_maps.push(path);
        }
    }

    // Directory iteration order is not stable across filesystems.
    symbol_maps.sort();
    Ok(symbol_maps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_archive(module: &str, with_dsym: bool) -> TempDir {
        let dir = TempDir::new().unwrap();
        let framework = dir
            .path()
            .join("Products/Library/Frameworks")
            .join(format!("{module}.framework"));
        std::fs::create_dir_all(&framework).unwrap();
        std::fs::write(framework.join(module), b"binary").unwrap();

        if with_dsym {
            let dsym = dir.path().join("dSYMs").join(format!("{module}.framework.dSYM"));
            std::fs::create_dir_all(&dsym).unwrap();
        }
        dir
    }

    fn write_symbol_map(archive: &TempDir, file_name: &str, module: &str) {
        let maps = archive.path().join("BCSymbolMaps");
        std::fs::create_dir_all(&maps).unwrap();
        let content = format!("BCSymbolMap\n{SYMBOL_MAP_MARKER_PREFIX}{module}\n_main\n");
        std::fs::write(maps.join(file_name), content).unwrap();
    }

    #[test]
    fn collect_finds_framework_dsym_and_relevant_maps() {
        let archive = fake_archive("Foo", true);
        write_symbol_map(&archive, "aaaa.bcsymbolmap", "Foo");
        write_symbol_map(&archive, "bbbb.bcsymbolmap", "SomeDependency");

        let artifacts = collect(archive.path(), "Foo").unwrap();
        assert!(artifacts.framework().ends_with("Foo.framework"));
        assert!(artifacts.dsym().is_some_and(|p| p.ends_with("Foo.framework.dSYM")));
        assert_eq!(artifacts.symbol_maps().len(), 1);
        assert!(artifacts.symbol_maps()[0].ends_with("aaaa.bcsymbolmap"));
    }

    #[test]
    fn collect_without_dsym_is_permitted() {
        let archive = fake_archive("Foo", false);
        let artifacts = collect(archive.path(), "Foo").unwrap();
        assert!(artifacts.dsym().is_none());
        assert!(artifacts.symbol_maps().is_empty());
    }

    #[test]
    fn collect_fails_when_no_framework_matches_module() {
        let archive = fake_archive("Other", true);
        let result = collect(archive.path(), "Foo");
        assert!(matches!(result, Err(Error::FrameworkNotFound { .. })));
    }

    #[test]
    fn collect_ignores_unrelated_framework_suffix_matches() {
        // "MyFoo.framework" must not satisfy a lookup for "Foo".
        let archive = fake_archive("MyFoo", false);
        let result = collect(archive.path(), "Foo");
        assert!(matches!(result, Err(Error::FrameworkNotFound { .. })));
    }

    #[test]
    fn symbol_maps_are_returned_in_file_name_order() {
        let archive = fake_archive("Foo", false);
        write_symbol_map(&archive, "cccc.bcsymbolmap", "Foo");
        write_symbol_map(&archive, "aaaa.bcsymbolmap", "Foo");

        let artifacts = collect(archive.path(), "Foo").unwrap();
        let names: Vec<_> = artifacts
            .symbol_maps()
            .iter()
            .filter_map(|p| p.file_name())
            .collect();
        assert_eq!(names, ["aaaa.bcsymbolmap", "cccc.bcsymbolmap"]);
    }
}
