//! Zip serialization of a staged mod tree
//!
//! The archive holds a single top-level folder named after the staged
//! directory, the layout mod loaders expect. Entries are written in sorted
//! order with a fixed timestamp so an unchanged tree always produces the
//! same bytes.

use crate::core::error::{PackError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Counters from writing one archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveStats {
    pub files: usize,
    pub directories: usize,
    /// Uncompressed bytes written
    pub bytes: u64,
}

/// Delete a previous archive at `path`. Returns whether one existed.
pub fn remove_stale_archive(path: &Path) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| PackError::path_io(path, e))?;
    info!(archive = %path.display(), "removed previous archive");
    Ok(true)
}

/// Zip `<base_dir>/<top>` into `output`, with entry names relative to
/// `base_dir` (so every entry starts with `<top>/`).
///
/// A partially written `output` is removed if anything fails.
pub fn write_zip(base_dir: &Path, top: &str, output: &Path) -> Result<ArchiveStats> {
    let source = base_dir.join(top);
    let partial = PartialArchive::new(output);

    let file = File::create(output).map_err(|e| PackError::path_io(output, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    let file_options = options.unix_permissions(0o644);
    let dir_options = options.unix_permissions(0o755);

    let mut stats = ArchiveStats::default();
    for entry in WalkDir::new(&source).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(base_dir, entry.path())?;

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), dir_options)?;
            stats.directories += 1;
        } else {
            zip.start_file(name, file_options)?;
            let mut input =
                File::open(entry.path()).map_err(|e| PackError::path_io(entry.path(), e))?;
            stats.bytes += io::copy(&mut input, &mut zip)?;
            stats.files += 1;
        }
    }

    let mut writer = zip.finish()?;
    writer.flush().map_err(|e| PackError::path_io(output, e))?;
    drop(writer);
    partial.commit();

    debug!(
        archive = %output.display(),
        files = stats.files,
        directories = stats.directories,
        "wrote archive"
    );
    Ok(stats)
}

/// Zip entry name: path relative to `base_dir`, `/`-separated
fn entry_name(base_dir: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(base_dir).map_err(|_| {
        PackError::path_io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "entry outside archive root"),
        )
    })?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Removes an archive file on drop unless committed
struct PartialArchive {
    path: PathBuf,
    committed: bool,
}

impl PartialArchive {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialArchive {
    fn drop(&mut self) {
        if !self.committed && self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!(archive = %self.path.display(), error = %e, "failed to remove partial archive");
            }
        }
    }
}
