//! Error types for bundle assembly operations.
//!
//! Every failure in a run is fatal and user-facing; each variant carries the
//! offending path, platform or value so the message can name it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all bundling operations
#[derive(Error, Debug)]
pub enum Error {
    /// A filesystem operation failed
    #[error("{action} {path:?}: {source}")]
    Fs {
        /// What was being done when the operation failed
        action: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// No framework matching the module name was found inside an archive
    #[error("no {name}.framework found in {path:?}")]
    FrameworkNotFound {
        /// Module name that was searched for
        name: String,
        /// Archive root that was searched
        path: PathBuf,
    },

    /// A release version string the version grouping does not match
    #[error(
        "invalid release version {value:?}: expected major.minor.patch with \
         optional -prerelease and +build suffixes"
    )]
    InvalidVersion {
        /// The rejected value
        value: String,
    },

    /// A metadata edit failed beyond the tolerated "key absent" case
    #[error("failed to {operation} {key} in {path:?}: {reason}")]
    MetadataEdit {
        /// The attempted operation ("set" or "add")
        operation: &'static str,
        /// The metadata key being edited
        key: String,
        /// The metadata file being edited
        path: PathBuf,
        /// The tool's reported failure
        reason: String,
    },

    /// An external tool exited with a failure status
    #[error("{tool} failed for {context}: {stderr}")]
    ToolFailed {
        /// Tool name and subcommand
        tool: &'static str,
        /// What the tool was operating on
        context: String,
        /// Captured standard error output
        stderr: String,
    },

    /// An external tool could not be spawned at all
    #[error("failed to execute {tool}: {source}")]
    ToolUnavailable {
        /// Tool name
        tool: &'static str,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Bundle manifest serialization errors
    #[error("failed to write bundle manifest: {0}")]
    Manifest(#[from] plist::Error),

    /// Configuration errors, reported before any external tool is invoked
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Generic errors without a richer classification
    #[error("{0}")]
    GenericError(String),
}

/// Configuration validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Platform name outside the requestable catalog
    #[error("unknown platform {value:?}: expected one of {expected}")]
    UnknownPlatform {
        /// The rejected value
        value: String,
        /// Comma-separated accepted names
        expected: String,
    },

    /// Build configuration outside Debug | Release
    #[error("invalid configuration {value:?}: expected Debug or Release")]
    InvalidConfiguration {
        /// The rejected value
        value: String,
    },

    /// Both a project and a workspace were supplied
    #[error("only one of project and workspace may be supplied, not both")]
    ProjectWorkspaceConflict,

    /// A supplied project/workspace path does not exist
    #[error("{kind} not found at {path:?}")]
    MissingPath {
        /// "project" or "workspace"
        kind: &'static str,
        /// The missing path
        path: PathBuf,
    },

    /// A supplied project/workspace path has the wrong shape
    #[error("{kind} at {path:?} must be a directory ending in {extension}")]
    MalformedPath {
        /// "project" or "workspace"
        kind: &'static str,
        /// The rejected path
        path: PathBuf,
        /// Expected bundle extension
        extension: &'static str,
    },

    /// The same platform was requested more than once
    #[error("platform {value:?} requested more than once")]
    DuplicatePlatform {
        /// The repeated platform name
        value: String,
    },

    /// No platforms were requested
    #[error("at least one platform must be requested")]
    NoPlatforms,

    /// A required field was not supplied to the builder
    #[error("{field} is required")]
    MissingField {
        /// Builder field name
        field: &'static str,
    },
}

/// Extension trait attaching a filesystem action and path to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] with the given context.
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}
