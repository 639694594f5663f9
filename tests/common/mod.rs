//! Test utilities for modpack tests

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// A mod directory and a separate working directory, removed on drop
pub struct TestMod {
    pub temp_dir: TempDir,
}

impl TestMod {
    /// Create an empty mod directory and working directory
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("mod"))?;
        fs::create_dir(temp_dir.path().join("work"))?;
        Ok(Self { temp_dir })
    }

    /// Create a mod with an `info.json` for `name`/`version`
    pub fn with_manifest(name: &str, version: &str) -> anyhow::Result<Self> {
        let test_mod = Self::new()?;
        test_mod.write(
            "info.json",
            &format!(r#"{{"name":"{name}","version":"{version}","title":"Test mod"}}"#),
        )?;
        Ok(test_mod)
    }

    /// The mod directory being packaged
    pub fn mod_dir(&self) -> PathBuf {
        self.temp_dir.path().join("mod")
    }

    /// Where staging and archives go
    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    /// Write a file under the mod directory, creating parents
    pub fn write(&self, relative: &str, contents: &str) -> anyhow::Result<()> {
        let path = self.mod_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }
}

/// All entry names in a zip archive
pub fn zip_entries(path: &Path) -> anyhow::Result<BTreeSet<String>> {
    let archive = ZipArchive::new(File::open(path)?)?;
    Ok(archive.file_names().map(String::from).collect())
}

/// Only the file (non-directory) entry names in a zip archive
pub fn zip_files(path: &Path) -> anyhow::Result<BTreeSet<String>> {
    Ok(zip_entries(path)?
        .into_iter()
        .filter(|name| !name.ends_with('/'))
        .collect())
}
