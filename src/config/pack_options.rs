//! Options for a packaging run

use crate::ignore::resolver::SUPPLEMENTARY_PATTERNS;
use std::path::{Path, PathBuf};

/// Default staging root, relative to the working directory
pub const DEFAULT_STAGING_ROOT: &str = "tmp";

/// Default git executable used for the excludes lookup
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Where a packaging run stages and writes, and which patterns it always
/// excludes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    /// Parent of the per-run `<stem>/` staging directory
    pub staging_root: PathBuf,
    /// Directory the `<stem>.zip` archive is written to
    pub output_dir: PathBuf,
    /// Patterns excluded regardless of ignore files
    pub supplementary_patterns: Vec<String>,
    /// git executable queried for `core.excludesfile`
    pub git_program: String,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            staging_root: PathBuf::from(DEFAULT_STAGING_ROOT),
            output_dir: PathBuf::from("."),
            supplementary_patterns: SUPPLEMENTARY_PATTERNS.iter().map(|p| p.to_string()).collect(),
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
        }
    }
}

impl PackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage under `<dir>/tmp` and write the archive into `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::default()
            .staging_root(dir.join(DEFAULT_STAGING_ROOT))
            .output_dir(dir)
    }

    pub fn staging_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.staging_root = path.into();
        self
    }

    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn supplementary_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supplementary_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }
}
