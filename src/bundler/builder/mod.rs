//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that sequences a
//! full run: archive every platform, stamp versions, collect artifacts,
//! assemble the bundle, zip it to the destination.
#![allow(dead_code)] // Public API - items may be used by external consumers

mod orchestrator;

pub use orchestrator::Bundler;
