//! Core types and utilities for modpack
//!
//! This module contains the error type, the manifest model and the
//! pattern-set types shared by the ignore, staging and archive layers.

pub mod error;
pub mod manifest;
pub mod types;

// Re-export commonly used items
pub use error::{PackError, Result};
pub use manifest::ModManifest;
pub use types::{PatternOrigin, PatternSet};
