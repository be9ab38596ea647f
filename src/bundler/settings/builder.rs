//! Builder for constructing Settings.

use super::{Configuration, ProjectKind, Settings};
use crate::bundler::error::ValidationError;
use crate::bundler::platform::Platform;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Collects raw, possibly invalid input and performs every configuration
/// check in [`build`](Self::build), returning a structured
/// [`ValidationError`] before any external tool has run.
///
/// # Examples
///
/// ```no_run
/// use xcframework_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> xcframework_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .scheme("MyLib-{{platform}}")
///     .name("MyLib")
///     .platforms(&["iOS".to_string(), "watchOS".to_string()])
///     .zip_destination("out/MyLib.xcframework.zip")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    scheme: Option<String>,
    name: Option<String>,
    platforms: Vec<String>,
    configuration: Option<String>,
    project: Option<PathBuf>,
    workspace: Option<PathBuf>,
    version: Option<String>,
    build_number: Option<String>,
    enable_library_evolution: bool,
    enable_sk_assertions: bool,
    xcargs: Vec<String>,
    zip_destination: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    ///
    /// Library evolution starts enabled; assertions start disabled.
    pub fn new() -> Self {
        Self {
            enable_library_evolution: true,
            ..Default::default()
        }
    }

    /// Sets the base scheme name.
    ///
    /// May carry the `{{platform}}` placeholder for platform-based scheme
    /// names, e.g. "MyLib-{{platform}}".
    ///
    /// # Required
    pub fn scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the module name when it differs from the scheme.
    ///
    /// Default: the scheme name. A trailing ".xcframework" suffix is
    /// stripped from either.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the requested platform names (e.g. "iOS", "watchOS").
    ///
    /// # Required
    pub fn platforms(mut self, platforms: &[String]) -> Self {
        self.platforms = platforms.to_vec();
        self
    }

    /// Sets the build configuration name.
    ///
    /// Default: "Release"
    pub fn configuration<S: Into<String>>(mut self, configuration: S) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Sets the project containing the scheme.
    ///
    /// Mutually exclusive with [`workspace`](Self::workspace).
    pub fn project<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the workspace containing the scheme.
    ///
    /// Mutually exclusive with [`project`](Self::project).
    pub fn workspace<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.workspace = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the release version stamped into archived products.
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the build number stamped into archived products.
    pub fn build_number<S: Into<String>>(mut self, build_number: S) -> Self {
        self.build_number = Some(build_number.into());
        self
    }

    /// Enables or disables library evolution mode.
    ///
    /// Default: enabled
    pub fn enable_library_evolution(mut self, enabled: bool) -> Self {
        self.enable_library_evolution = enabled;
        self
    }

    /// Enables or disables the assertion build flag.
    ///
    /// Default: disabled
    pub fn enable_sk_assertions(mut self, enabled: bool) -> Self {
        self.enable_sk_assertions = enabled;
        self
    }

    /// Sets additional build flags, appended after the fixed set.
    ///
    /// Default: none
    pub fn xcargs(mut self, xcargs: Vec<String>) -> Self {
        self.xcargs = xcargs;
        self
    }

    /// Sets the path the zipped bundle is written to.
    ///
    /// # Required
    pub fn zip_destination<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.zip_destination = Some(path.as_ref().to_path_buf());
        self
    }

    /// Validates the collected input and builds the settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a required field is missing, a
    /// platform or configuration name is unknown, both project and workspace
    /// were supplied, or a supplied container path is missing or malformed.
    pub fn build(self) -> std::result::Result<Settings, ValidationError> {
        let scheme = match self.scheme {
            Some(scheme) if !scheme.is_empty() => scheme,
            _ => return Err(ValidationError::MissingField { field: "scheme" }),
        };

        if self.platforms.is_empty() {
            return Err(ValidationError::NoPlatforms);
        }
        let platforms = self
            .platforms
            .iter()
            .map(|value| Platform::parse(value))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        // Slice identifiers are unique per bundle, so a platform may only
        // appear once.
        for (index, platform) in platforms.iter().enumerate() {
            if platforms[..index].contains(platform) {
                return Err(ValidationError::DuplicatePlatform {
                    value: platform.key().to_string(),
                });
            }
        }

        let configuration = match self.configuration.as_deref() {
            Some(value) => Configuration::parse(value)?,
            None => Configuration::default(),
        };

        let source = match (self.project, self.workspace) {
            (Some(_), Some(_)) => return Err(ValidationError::ProjectWorkspaceConflict),
            (Some(path), None) => {
                validate_container(&path, "project", "xcodeproj")?;
                Some(ProjectKind::Project(path))
            }
            (None, Some(path)) => {
                validate_container(&path, "workspace", "xcworkspace")?;
                Some(ProjectKind::Workspace(path))
            }
            (None, None) => None,
        };

        let zip_destination = self
            .zip_destination
            .ok_or(ValidationError::MissingField {
                field: "zip_destination",
            })?;

        // The framework inside each archive is named after the module, not
        // the per-platform scheme.
        let raw_name = self.name.unwrap_or_else(|| scheme.clone());
        let module_name = raw_name
            .strip_suffix(".xcframework")
            .unwrap_or(&raw_name)
            .to_string();

        Ok(Settings {
            scheme,
            module_name,
            platforms,
            configuration,
            source,
            version: self.version,
            build_number: self.build_number,
            enable_library_evolution: self.enable_library_evolution,
            enable_sk_assertions: self.enable_sk_assertions,
            xcargs: self.xcargs,
            zip_destination,
        })
    }
}

/// Checks that a project/workspace path exists, is a directory, and carries
/// the expected bundle extension.
fn validate_container(
    path: &Path,
    kind: &'static str,
    extension: &'static str,
) -> std::result::Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::MissingPath {
            kind,
            path: path.to_path_buf(),
        });
    }
    let has_extension = path
        .extension()
        .is_some_and(|value| value == extension);
    if !path.is_dir() || !has_extension {
        return Err(ValidationError::MalformedPath {
            kind,
            path: path.to_path_buf(),
            extension,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn base_builder() -> SettingsBuilder {
        SettingsBuilder::new()
            .scheme("MyLib")
            .platforms(&["iOS".to_string()])
            .zip_destination("out/MyLib.xcframework.zip")
    }

    #[test]
    fn module_name_defaults_to_scheme_without_bundle_suffix() {
        let settings = base_builder().build().unwrap();
        assert_eq!(settings.module_name(), "MyLib");

        let settings = base_builder().name("Other.xcframework").build().unwrap();
        assert_eq!(settings.module_name(), "Other");
    }

    #[test]
    fn missing_scheme_is_rejected() {
        let result = SettingsBuilder::new()
            .platforms(&["iOS".to_string()])
            .zip_destination("out.zip")
            .build();
        assert!(matches!(
            result,
            Err(ValidationError::MissingField { field: "scheme" })
        ));
    }

    #[test]
    fn empty_platform_list_is_rejected() {
        let result = SettingsBuilder::new()
            .scheme("MyLib")
            .zip_destination("out.zip")
            .build();
        assert!(matches!(result, Err(ValidationError::NoPlatforms)));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let result = base_builder().platforms(&["android".to_string()]).build();
        assert!(matches!(
            result,
            Err(ValidationError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn repeated_platform_is_rejected() {
        let result = base_builder()
            .platforms(&["iOS".to_string(), "macOS".to_string(), "iOS".to_string()])
            .build();
        assert!(matches!(
            result,
            Err(ValidationError::DuplicatePlatform { .. })
        ));
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let result = base_builder().configuration("Profile").build();
        assert!(matches!(
            result,
            Err(ValidationError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn project_and_workspace_conflict() {
        let result = base_builder()
            .project("App.xcodeproj")
            .workspace("App.xcworkspace")
            .build();
        assert!(matches!(
            result,
            Err(ValidationError::ProjectWorkspaceConflict)
        ));
    }

    #[test]
    fn missing_project_path_is_rejected() {
        let result = base_builder().project("/nonexistent/App.xcodeproj").build();
        assert!(matches!(result, Err(ValidationError::MissingPath { .. })));
    }

    #[test]
    fn project_path_must_be_a_bundle_directory() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("App");
        std::fs::create_dir(&plain).unwrap();
        let result = base_builder().project(&plain).build();
        assert!(matches!(result, Err(ValidationError::MalformedPath { .. })));
    }

    #[test]
    fn valid_project_bundle_is_accepted() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("App.xcodeproj");
        std::fs::create_dir(&project).unwrap();
        let settings = base_builder().project(&project).build().unwrap();
        assert!(matches!(settings.source(), Some(ProjectKind::Project(_))));
    }
}
