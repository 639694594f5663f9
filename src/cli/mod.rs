//! Command-line interfaces for modpack

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::error::PackError;

pub mod commands;

/// modpack - package a mod directory into a distributable zip
#[derive(Parser, Debug)]
#[command(
    name = "modpack",
    version,
    about = "Package a mod directory into <name>_<version>.zip, leaving out ignored files",
    long_about = "Reads <TARGET>/info.json for the mod name and version, copies the directory \
                  while skipping everything matched by .gitignore, the global git excludes file \
                  and the built-in exclusions, and writes <name>_<version>.zip to the current directory."
)]
pub struct Cli {
    /// Mod directory to package
    #[arg(default_value = ".")]
    pub target: PathBuf,
}

/// pack-sprites - assemble numbered tiles into one sprite sheet
#[derive(Parser, Debug)]
#[command(
    name = "pack-sprites",
    version,
    about = "Assemble art/<PATH>/<PREFIX>-NNNN.png tiles into graphics/<PATH>/<PREFIX>.png"
)]
pub struct SpritesCli {
    /// Directory under art/ (and graphics/) holding the tiles
    pub path: PathBuf,

    /// Tile name prefix
    pub prefix: String,
}

/// Initialize logging from `RUST_LOG`, defaulting to `info`
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print a failure for the user.
///
/// Configuration problems get their plain message; everything else gets the
/// full cause chain.
pub fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<PackError>() {
        Some(pack_err) if pack_err.is_configuration_missing() => {
            eprintln!("{}", pack_err.to_string().yellow());
        }
        _ => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
        }
    }
}
