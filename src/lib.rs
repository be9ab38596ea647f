//! Multi-platform XCFramework assembly library
//!
//! This library drives the full release pipeline for a binary framework:
//! - Archives a scheme for every requested platform (plus simulator variants)
//! - Stamps release version and build number into archived products
//! - Collects frameworks, dSYMs and module-relevant BCSymbolMaps
//! - Assembles an XCFramework, either via `xcodebuild -create-xcframework`
//!   or with a manually generated Carthage-style layout and manifest
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, Result};
