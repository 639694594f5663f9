//! pack-sprites CLI
//!
//! Assembles numbered tiles into a sprite sheet with ImageMagick.

use clap::Parser;
use modpack::cli::{self, SpritesCli};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_logging();

    let cli = SpritesCli::parse();

    match cli::commands::sprites::execute(cli.path, cli.prefix) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report_error(&e);
            ExitCode::FAILURE
        }
    }
}
