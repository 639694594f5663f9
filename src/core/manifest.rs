//! Mod manifest (`info.json`) loading

use crate::core::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the manifest inside a mod directory
pub const MANIFEST_FILE: &str = "info.json";

/// The two manifest fields packaging depends on.
///
/// Real manifests carry more keys (title, author, dependencies, ...); those are
/// accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModManifest {
    pub name: String,
    pub version: String,
}

impl ModManifest {
    /// Load and validate `<mod_dir>/info.json`
    pub fn load(mod_dir: &Path) -> Result<Self> {
        let path = mod_dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(PackError::manifest_missing(mod_dir));
        }

        let content = fs::read_to_string(&path).map_err(|e| PackError::path_io(&path, e))?;
        Self::from_json(&content).map_err(|reason| PackError::manifest_invalid(&path, reason))
    }

    /// Parse and validate manifest JSON
    pub fn from_json(content: &str) -> std::result::Result<Self, String> {
        let manifest: ModManifest = serde_json::from_str(content).map_err(|e| e.to_string())?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        for (field, value) in [("name", &self.name), ("version", &self.version)] {
            if value.is_empty() {
                return Err(format!("field `{field}` must not be empty"));
            }
            // Both end up in a file name and an archive folder name
            if value.contains(['/', '\\']) || value == ".." {
                return Err(format!("field `{field}` must not contain path separators"));
            }
        }
        Ok(())
    }

    /// `<name>_<version>`: the archive file stem and its top-level folder
    pub fn stem(&self) -> String {
        format!("{}_{}", self.name, self.version)
    }

    /// `<name>_<version>.zip`
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.stem())
    }
}
