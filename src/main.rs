//! modpack CLI
//!
//! Packages a mod directory into `<name>_<version>.zip`.

use clap::Parser;
use modpack::cli::{self, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logging
    cli::init_logging();

    // Parse command line arguments
    let cli = Cli::parse();

    match cli::commands::pack::execute(cli.target) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report_error(&e);
            ExitCode::FAILURE
        }
    }
}
