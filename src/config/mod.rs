//! Run configuration for modpack
//!
//! There is no configuration file: callers build [`PackOptions`] (the CLI
//! uses the defaults) and log verbosity comes from `RUST_LOG`.

pub mod pack_options;

// Re-export commonly used items
pub use pack_options::PackOptions;
