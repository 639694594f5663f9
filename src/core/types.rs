//! Core data types for modpack

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Where an ignore pattern came from.
///
/// Origins only fix the order sources are read in; every origin contributes
/// to the same flat set and none can override or negate another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternOrigin {
    /// `<repo>/.gitignore`
    LocalIgnoreFile,
    /// The file named by git's `core.excludesfile`
    GlobalExcludesFile,
    /// The built-in list always excluded from packages
    Supplementary,
}

impl fmt::Display for PatternOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternOrigin::LocalIgnoreFile => write!(f, "local .gitignore"),
            PatternOrigin::GlobalExcludesFile => write!(f, "global excludes file"),
            PatternOrigin::Supplementary => write!(f, "supplementary list"),
        }
    }
}

/// The resolved, de-duplicated set of glob patterns for one packaging run.
///
/// Built once by [`crate::ignore::resolver::PatternResolver`] and read-only
/// afterwards. Iteration order is lexical, which keeps logs and filtering
/// deterministic; the order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: BTreeSet<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains(pattern)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.patterns.iter()
    }

    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.patterns
    }
}

impl FromIterator<String> for PatternSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for PatternSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_set_deduplicates() {
        let set: PatternSet = ["*.py", "art", "*.py", ".git"].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains("*.py"));
        assert!(!set.contains("*.PY"));
    }

    #[test]
    fn test_exact_string_equality() {
        let set: PatternSet = ["build", "build ", " build"].into_iter().collect();
        assert_eq!(set.len(), 3);
    }
}
