//! Pack command implementation

use crate::config::PackOptions;
use crate::package::Packager;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the pack command
pub fn execute(target: PathBuf) -> Result<()> {
    let packager = Packager::new(PackOptions::default());
    let report = packager
        .run(&target)
        .with_context(|| format!("Failed to package {}", target.display()))?;

    if report.replaced_previous {
        println!("  {} Replaced previous {}", "•".cyan(), report.archive.display());
    }
    println!(
        "  • Files packaged: {} ({} excluded, {} patterns)",
        report.copy.files, report.copy.excluded, report.patterns
    );
    println!(
        "{} Created {}",
        "✓".green().bold(),
        report.archive.display().to_string().bright_white()
    );

    Ok(())
}
