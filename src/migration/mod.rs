//! Schema migrations for judgment configs.
//!
//! This module handles:
//! - The ordered registry of versioned migration steps
//! - Applying pending steps to an older config and restamping its version

pub mod registry;
pub mod steps;

pub use registry::{Migration, MigrationFn, MigrationRegistry};
