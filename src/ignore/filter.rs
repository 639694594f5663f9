//! Per-directory exclusion: which entries of one directory match the pattern set

use crate::core::error::{PackError, Result};
use crate::core::types::PatternSet;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Shell-style matching on bare names: case-sensitive, and wildcards match
/// leading dots.
const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
enum NameMatcher {
    Glob(Pattern),
    Literal(String),
}

impl NameMatcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::Glob(pattern) => pattern.matches_with(name, NAME_MATCH),
            NameMatcher::Literal(literal) => literal == name,
        }
    }
}

/// A [`PatternSet`] compiled for matching directory entry names.
///
/// The same filter is applied at every depth of a tree; patterns never anchor
/// to a directory level and only ever see the bare entry name.
#[derive(Debug, Clone)]
pub struct DirectoryFilter {
    matchers: Vec<NameMatcher>,
}

impl DirectoryFilter {
    pub fn new(patterns: &PatternSet) -> Self {
        let matchers = patterns.iter().map(|p| compile(p)).collect();
        Self { matchers }
    }

    /// Whether a bare entry name matches any pattern
    pub fn matches(&self, name: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(name))
    }

    /// Names directly inside `dir` that match at least one pattern
    pub fn excluded_entries(&self, dir: &Path) -> Result<BTreeSet<OsString>> {
        let mut excluded = BTreeSet::new();

        for entry in fs::read_dir(dir).map_err(|e| PackError::path_io(dir, e))? {
            let entry = entry.map_err(|e| PackError::path_io(dir, e))?;
            let name = entry.file_name();
            if self.matches(&name.to_string_lossy()) {
                excluded.insert(name);
            }
        }

        if !excluded.is_empty() {
            debug!(dir = %dir.display(), excluded = ?excluded, "excluding entries");
        }
        Ok(excluded)
    }
}

/// Names directly inside `dir` that match at least one pattern of `patterns`
pub fn excluded_entries(dir: &Path, patterns: &PatternSet) -> Result<BTreeSet<OsString>> {
    DirectoryFilter::new(patterns).excluded_entries(dir)
}

/// Compile one pattern with fnmatch semantics.
///
/// `glob` rejects two things fnmatch accepts: `**` inside a name (for bare
/// names it is the same as `*`) and an unclosed `[` (a literal bracket for
/// fnmatch). Both are rewritten before giving up and matching literally.
fn compile(pattern: &str) -> NameMatcher {
    let mut chars: Vec<char> = collapse_stars(pattern).chars().collect();

    for _ in 0..=chars.len() {
        let candidate: String = chars.iter().collect();
        match Pattern::new(&candidate) {
            Ok(compiled) => return NameMatcher::Glob(compiled),
            Err(e) if chars.get(e.pos) == Some(&'[') => {
                chars.splice(e.pos..=e.pos, ['[', '[', ']']);
            }
            Err(e) => {
                warn!(pattern, error = %e, "invalid glob, matching literally");
                return NameMatcher::Literal(pattern.to_string());
            }
        }
    }

    warn!(pattern, "unrepairable glob, matching literally");
    NameMatcher::Literal(pattern.to_string())
}

fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}
