//! Configuration structures for bundling runs.
//!
//! A run's configuration is validated up front by [`SettingsBuilder`] and
//! frozen into an immutable [`Settings`] before any external tool is invoked.

mod builder;
mod core;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::{Configuration, ProjectKind, Settings};
