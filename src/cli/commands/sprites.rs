//! Sprite sheet command implementation

use crate::sprites::{pack_sprites, MagickTool, SpriteSheetJob};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the pack-sprites command
pub fn execute(path: PathBuf, prefix: String) -> Result<()> {
    let job = SpriteSheetJob::new(path, prefix);
    println!("Packing: {}", job.output_path().display());

    let report = pack_sprites(&job, &MagickTool::new())
        .with_context(|| format!("Failed to pack {}", job.output_path().display()))?;

    println!("Dimensions: {}", report.geometry);
    println!(
        "{} Packed {} tiles into {}",
        "✓".green().bold(),
        report.tiles,
        report.output.display()
    );
    Ok(())
}
