//! Lookup of the user's global git excludes file (`core.excludesfile`)

use crate::core::error::{PackError, Result};
use directories::UserDirs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Source of the global excludes file path for a repository.
///
/// `Ok(None)` means "no global excludes file": the key is unset, git is not
/// installed, or the repository is unusable. Only unexpected failures are
/// returned as errors.
pub trait ExcludesLookup {
    fn excludes_file(&self, repo_root: &Path) -> Result<Option<PathBuf>>;
}

/// Queries `git --git-dir <repo>/.git config core.excludesfile`
#[derive(Debug, Clone)]
pub struct GitConfigLookup {
    program: String,
}

impl GitConfigLookup {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitConfigLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcludesLookup for GitConfigLookup {
    fn excludes_file(&self, repo_root: &Path) -> Result<Option<PathBuf>> {
        let git_dir = repo_root.join(".git");
        let output = match Command::new(&self.program)
            .arg("--git-dir")
            .arg(&git_dir)
            .args(["config", "core.excludesfile"])
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(program = %self.program, "git executable not found, no global excludes");
                return Ok(None);
            }
            Err(e) => return Err(PackError::Io(e)),
        };

        if !output.status.success() {
            debug!(status = %output.status, "core.excludesfile not available");
            return Ok(None);
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| PackError::git_output(format!("core.excludesfile is not UTF-8: {e}")))?;
        let value = stdout.trim_end();
        if value.is_empty() {
            return Ok(None);
        }

        let path = expand_home(value);
        debug!(path = %path.display(), "global excludes file");
        Ok(Some(path))
    }
}

/// Always reports "no global excludes file"
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGlobalExcludes;

impl ExcludesLookup for NoGlobalExcludes {
    fn excludes_file(&self, _repo_root: &Path) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Expand a leading `~` (alone or followed by `/`) to the home directory.
///
/// Without a home directory the value is returned unchanged.
pub fn expand_home(value: &str) -> PathBuf {
    let user_dirs = UserDirs::new();
    expand_home_in(value, user_dirs.as_ref().map(UserDirs::home_dir))
}

fn expand_home_in(value: &str, home: Option<&Path>) -> PathBuf {
    let rest = match value.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR) => {
            &rest[1..]
        }
        _ => return PathBuf::from(value),
    };

    match home {
        Some(home) if rest.is_empty() => home.to_path_buf(),
        Some(home) => home.join(rest),
        None => {
            debug!(value, "no home directory, excludes path left unexpanded");
            PathBuf::from(value)
        }
    }
}
