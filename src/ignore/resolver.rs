//! Merges every ignore-pattern origin into one [`PatternSet`]

use crate::core::error::Result;
use crate::core::types::{PatternOrigin, PatternSet};
use crate::ignore::git_config::{ExcludesLookup, GitConfigLookup};
use crate::ignore::parser::read_patterns;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Patterns always excluded from a package: sources and tooling, VCS
/// metadata, editor settings, raw art and video.
pub const SUPPLEMENTARY_PATTERNS: &[&str] =
    &["*.py", "*.exe", ".git", ".gitignore", "*.mp4", ".vscode", "art"];

/// Name of the repository-local ignore file
pub const LOCAL_IGNORE_FILE: &str = ".gitignore";

/// Resolves the flat pattern set for a repository root
pub struct PatternResolver {
    lookup: Box<dyn ExcludesLookup>,
    supplementary: Vec<String>,
}

impl PatternResolver {
    /// Resolver using `git` for the excludes lookup and the default
    /// supplementary list
    pub fn new() -> Self {
        Self::with_lookup(GitConfigLookup::new())
    }

    pub fn with_lookup<L>(lookup: L) -> Self
    where
        L: ExcludesLookup + 'static,
    {
        Self {
            lookup: Box::new(lookup),
            supplementary: SUPPLEMENTARY_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Replace the supplementary list
    pub fn supplementary<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supplementary = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Read the patterns contributed by one origin
    pub fn read_origin(&self, origin: PatternOrigin, repo_root: &Path) -> Result<BTreeSet<String>> {
        match origin {
            PatternOrigin::LocalIgnoreFile => read_patterns(&repo_root.join(LOCAL_IGNORE_FILE)),
            PatternOrigin::GlobalExcludesFile => match self.lookup.excludes_file(repo_root)? {
                Some(path) => read_patterns(&path),
                None => Ok(BTreeSet::new()),
            },
            PatternOrigin::Supplementary => Ok(self.supplementary.iter().cloned().collect()),
        }
    }

    /// Union of local, global and supplementary patterns
    pub fn resolve(&self, repo_root: &Path) -> Result<PatternSet> {
        let mut patterns = BTreeSet::new();

        for origin in [
            PatternOrigin::LocalIgnoreFile,
            PatternOrigin::GlobalExcludesFile,
            PatternOrigin::Supplementary,
        ] {
            let contributed = self.read_origin(origin, repo_root)?;
            debug!(%origin, count = contributed.len(), "pattern origin read");
            patterns.extend(contributed);
        }

        let set: PatternSet = patterns.into_iter().collect();
        info!(patterns = set.len(), root = %repo_root.display(), "resolved ignore patterns");
        Ok(set)
    }
}

impl Default for PatternResolver {
    fn default() -> Self {
        Self::new()
    }
}
