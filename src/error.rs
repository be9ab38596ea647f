//! Top-level error types for the bundler CLI.

use thiserror::Error;

/// Result type alias for CLI-level operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type surfaced to the user by the binary
#[derive(Error, Debug)]
pub enum BundlerError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pipeline errors
    #[error(transparent)]
    Bundler(#[from] crate::bundler::Error),
}
