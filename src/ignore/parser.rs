//! Ignore-file reader: one `.gitignore`-style file into a set of raw patterns

use crate::core::error::{PackError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read the patterns from an ignore file.
///
/// A missing file contributes nothing. Lines starting with `#` are comments;
/// every other line, blank ones included, is kept verbatim apart from its
/// line terminator. Glob syntax is not checked here.
pub fn read_patterns(path: &Path) -> Result<BTreeSet<String>> {
    if !path.is_file() {
        debug!(path = %path.display(), "ignore file not present");
        return Ok(BTreeSet::new());
    }

    let content = fs::read_to_string(path).map_err(|e| PackError::path_io(path, e))?;
    let patterns = parse_patterns(&content);
    debug!(path = %path.display(), count = patterns.len(), "read ignore patterns");

    Ok(patterns)
}

/// Parse ignore-file content into a set of patterns
pub fn parse_patterns(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter(|line| !is_comment(line))
        .map(str::to_string)
        .collect()
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic_patterns() {
        let content = "# Comments are ignored\n*.tmp\nbuild\n#also a comment\nnode_modules\n";
        let patterns = parse_patterns(content);

        let expected: BTreeSet<String> = ["*.tmp", "build", "node_modules"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(patterns, expected);
    }

    #[test]
    fn test_only_line_terminator_is_stripped() {
        let patterns = parse_patterns("  padded  \r\ntrailing\t\n\nlast");

        assert!(patterns.contains("  padded  "));
        assert!(patterns.contains("trailing\t"));
        assert!(patterns.contains("last"));
        // Blank lines are kept as (inert) patterns
        assert!(patterns.contains(""));
        assert_eq!(patterns.len(), 4);
    }

    #[test]
    fn test_indented_hash_is_not_a_comment() {
        let patterns = parse_patterns(" #not-a-comment\n#comment\n");
        assert_eq!(patterns.len(), 1);
        assert!(patterns.contains(" #not-a-comment"));
    }

    #[test]
    fn test_malformed_glob_is_kept() {
        let patterns = parse_patterns("[unclosed\n");
        assert!(patterns.contains("[unclosed"));
    }

    #[test]
    fn test_from_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let gitignore = temp_dir.path().join(".gitignore");
        std::fs::write(&gitignore, "*.tmp\n*.tmp\nbuild\n")?;

        let patterns = read_patterns(&gitignore)?;
        assert_eq!(patterns.len(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_empty() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let patterns = read_patterns(&temp_dir.path().join(".gitignore"))?;
        assert!(patterns.is_empty());

        // A directory where the file should be is also "not present"
        std::fs::create_dir(temp_dir.path().join("dir-ignore"))?;
        assert!(read_patterns(&temp_dir.path().join("dir-ignore"))?.is_empty());
        Ok(())
    }
}
