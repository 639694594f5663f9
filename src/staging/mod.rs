//! Ephemeral staging tree for one packaging run
//!
//! A [`StagingTree`] owns `<staging_root>/<stem>/` for the duration of a run
//! and removes it when dropped, whether the run succeeded or not.

pub mod copier;

pub use copier::{copy_tree, copy_tree_skipping, CopyStats};

use crate::core::error::{PackError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scoped owner of a staging directory
#[derive(Debug)]
pub struct StagingTree {
    root: PathBuf,
    path: PathBuf,
    created_root: bool,
}

impl StagingTree {
    /// Create `<staging_root>/<stem>`.
    ///
    /// Refuses to take over a non-empty directory, since dropping the guard
    /// deletes it.
    pub fn create(staging_root: &Path, stem: &str) -> Result<Self> {
        let path = staging_root.join(stem);
        if is_non_empty_dir(&path)? {
            return Err(PackError::StagingExists { path });
        }

        let created_root = !staging_root.exists();
        fs::create_dir_all(&path).map_err(|e| PackError::path_io(&path, e))?;
        debug!(path = %path.display(), "created staging tree");

        Ok(Self {
            root: staging_root.to_path_buf(),
            path,
            created_root,
        })
    }

    /// The directory files are staged into
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parent of the staging directory; archives are rooted here so
    /// entries carry the `<stem>/` prefix
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for StagingTree {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_dir_all(&self.path) {
                warn!(path = %self.path.display(), error = %e, "failed to remove staging tree");
            }
        }

        // Only a root this run created is removed, and only once empty
        if self.created_root {
            let _ = fs::remove_dir(&self.root);
        }
        debug!(path = %self.path.display(), "cleaned up staging tree");
    }
}

/// Whether `path` exists and is anything other than an empty directory
pub(crate) fn is_non_empty_dir(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    if !path.is_dir() {
        return Ok(true);
    }

    let mut entries = fs::read_dir(path).map_err(|e| PackError::path_io(path, e))?;
    Ok(entries.next().is_some())
}
