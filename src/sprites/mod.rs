//! Sprite sheet assembly from numbered animation tiles
//!
//! Tiles named `<prefix>-NNNN.png` under `art/<path>/` are laid out, in
//! number order, on a 7-column transparent sheet at `graphics/<path>/<prefix>.png`.
//! Compositing is delegated to ImageMagick; this module only finds the tiles
//! and drives the tool.

use crate::core::error::{PackError, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info};

/// Columns per sheet row
pub const SHEET_COLUMNS: u32 = 7;

/// Fully transparent sheet background
pub const SHEET_BACKGROUND: &str = "#00000000";

/// Which tiles to pack and where the sheet goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheetJob {
    /// Root of the source tiles (`./art`)
    pub art_root: PathBuf,
    /// Root of the generated sheets (`./graphics`)
    pub graphics_root: PathBuf,
    /// Sub-directory shared by the tiles and the sheet
    pub path: PathBuf,
    /// Tile and sheet name prefix
    pub prefix: String,
}

impl SpriteSheetJob {
    /// Job rooted at `./art` and `./graphics`
    pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self::in_dir(Path::new("."), path, prefix)
    }

    /// Job rooted at `<dir>/art` and `<dir>/graphics`
    pub fn in_dir(dir: &Path, path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            art_root: dir.join("art"),
            graphics_root: dir.join("graphics"),
            path: path.into(),
            prefix: prefix.into(),
        }
    }

    /// Glob for the tiles: `<art>/<path>/<prefix>-[0-9][0-9][0-9][0-9].png`
    pub fn tile_pattern(&self) -> String {
        let dir = self.art_root.join(&self.path);
        let file = format!(
            "{}-[0-9][0-9][0-9][0-9].png",
            glob::Pattern::escape(&self.prefix)
        );
        format!(
            "{}{}{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            std::path::MAIN_SEPARATOR,
            file
        )
    }

    /// `<graphics>/<path>/<prefix>.png`
    pub fn output_path(&self) -> PathBuf {
        self.graphics_root
            .join(&self.path)
            .join(format!("{}.png", self.prefix))
    }

    /// Matching tiles in ascending order
    pub fn discover_tiles(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.tile_pattern();
        let mut tiles = glob::glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
        if tiles.is_empty() {
            return Err(PackError::NoTilesFound { pattern });
        }
        tiles.sort();
        Ok(tiles)
    }
}

/// External image tool used to measure tiles and composite the sheet
pub trait ImageTool {
    /// `<width>x<height>` of one image
    fn identify_geometry(&self, image: &Path) -> Result<String>;

    /// Lay `tiles` out on a sheet with cells of `geometry`, written to `output`
    fn montage(&self, tiles: &[PathBuf], geometry: &str, output: &Path) -> Result<()>;
}

/// ImageMagick 7 (`magick identify` / `magick montage`)
#[derive(Debug, Clone)]
pub struct MagickTool {
    program: String,
}

impl MagickTool {
    pub fn new() -> Self {
        Self::with_program("magick")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.program).args(args).output()?;
        if !output.status.success() {
            return Err(PackError::ImageToolFailed {
                tool: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl Default for MagickTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageTool for MagickTool {
    fn identify_geometry(&self, image: &Path) -> Result<String> {
        let output = self.run([
            OsStr::new("identify"),
            OsStr::new("-format"),
            OsStr::new("%[fx:w]x%[fx:h]"),
            image.as_os_str(),
        ])?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn montage(&self, tiles: &[PathBuf], geometry: &str, output: &Path) -> Result<()> {
        let columns = SHEET_COLUMNS.to_string();
        let mut args: Vec<&OsStr> = vec![
            OsStr::new("montage"),
            OsStr::new("-background"),
            OsStr::new(SHEET_BACKGROUND),
            OsStr::new("-tile"),
            OsStr::new(&columns),
            OsStr::new("-geometry"),
            OsStr::new(geometry),
            OsStr::new("-border"),
            OsStr::new("0"),
        ];
        args.extend(tiles.iter().map(|t| t.as_os_str()));
        args.push(output.as_os_str());

        self.run(args)?;
        Ok(())
    }
}

/// What [`pack_sprites`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheetReport {
    pub output: PathBuf,
    pub tiles: usize,
    /// Cell size taken from the first tile
    pub geometry: String,
}

/// Find the job's tiles and composite them into its sheet
pub fn pack_sprites(job: &SpriteSheetJob, tool: &dyn ImageTool) -> Result<SpriteSheetReport> {
    let tiles = job.discover_tiles()?;
    let output = job.output_path();
    info!(output = %output.display(), tiles = tiles.len(), "packing sprite sheet");

    let geometry = tool.identify_geometry(&tiles[0])?;
    debug!(%geometry, "tile dimensions");

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| PackError::path_io(parent, e))?;
    }
    tool.montage(&tiles, &geometry, &output)?;

    Ok(SpriteSheetReport {
        output,
        tiles: tiles.len(),
        geometry,
    })
}
