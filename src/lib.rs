//! modpack - package mod directories into distributable zips
//!
//! modpack copies a mod directory into a staging tree, leaving out everything
//! matched by the repository's `.gitignore`, the user's global git excludes
//! file and a built-in list of source and tooling files, then zips the result
//! as `<name>_<version>.zip` (name and version come from `info.json`).
//!
//! # Core Features
//!
//! - **Flat ignore patterns**: every pattern is matched against bare entry
//!   names at every depth, with shell glob semantics
//! - **Pruned copies**: excluded directories are never entered
//! - **Scoped staging**: the staging tree is removed on every exit path
//! - **Deterministic archives**: an unchanged tree always zips to the same bytes
//! - **Sprite sheets**: numbered tiles are assembled with ImageMagick
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use modpack::{PackOptions, Packager};
//! use std::path::Path;
//!
//! let report = Packager::new(PackOptions::default()).run(Path::new("./my-mod"))?;
//! println!("{} files packaged", report.copy.files);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;
pub mod package;
pub mod sprites;
pub mod staging;

// Re-export commonly used types
pub use crate::core::{
    error::{PackError, Result},
    manifest::ModManifest,
    types::{PatternOrigin, PatternSet},
};

pub use config::PackOptions;
pub use ignore::{DirectoryFilter, PatternResolver};
pub use package::{PackReport, Packager};
pub use staging::{copy_tree, copy_tree_skipping, CopyStats, StagingTree};

/// Current version of modpack
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
