//! Recursive filtered copy into a staging directory

use crate::core::error::{PackError, Result};
use crate::staging::is_non_empty_dir;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Counters from one tree copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Regular files copied
    pub files: usize,
    /// Directories created, the destination root included
    pub directories: usize,
    /// Entries skipped by the exclude callback (excluded directories count once)
    pub excluded: usize,
    /// Bytes of file content copied
    pub bytes: u64,
}

/// Mirror `source` into `dest`, skipping what `exclude` names.
///
/// `exclude` is called once for every directory visited, the root included,
/// and returns the bare names to skip at that level. An excluded directory is
/// never entered. Traversal is depth-first in file-name order and follows
/// symlinks, so the staged tree holds plain copies of file contents.
///
/// `dest` must be absent or empty. On error the partially populated `dest`
/// is left for the caller to remove.
pub fn copy_tree<F>(source: &Path, dest: &Path, exclude: F) -> Result<CopyStats>
where
    F: Fn(&Path) -> Result<BTreeSet<OsString>>,
{
    copy_tree_skipping(source, dest, &[], exclude)
}

/// [`copy_tree`], additionally pruning every path in `skip` that lies inside
/// `source`.
///
/// `dest` is always skipped. Paths that do not exist yet are ignored.
pub fn copy_tree_skipping<F>(
    source: &Path,
    dest: &Path,
    skip: &[&Path],
    exclude: F,
) -> Result<CopyStats>
where
    F: Fn(&Path) -> Result<BTreeSet<OsString>>,
{
    if is_non_empty_dir(dest)? {
        return Err(PackError::DestinationNotEmpty {
            path: dest.to_path_buf(),
        });
    }
    fs::create_dir_all(dest).map_err(|e| PackError::path_io(dest, e))?;

    // The destination may live inside the source (e.g. packaging "." into
    // "./tmp/<stem>"); it must never be copied into itself.
    let dest_canonical = fs::canonicalize(dest).map_err(|e| PackError::path_io(dest, e))?;
    let source_canonical = fs::canonicalize(source).ok();
    let mut pruned = vec![dest_canonical];
    pruned.extend(
        skip.iter()
            .filter_map(|path| fs::canonicalize(path).ok())
            .filter(|path| Some(path) != source_canonical.as_ref()),
    );
    let pruned_names: BTreeSet<OsString> = pruned
        .iter()
        .filter_map(|path| path.file_name().map(OsString::from))
        .collect();

    // Exclusion sets of the directories on the current walk path, indexed by
    // depth. Entry `d` belongs to the most recently yielded directory at `d`.
    let exclusions: RefCell<Vec<BTreeSet<OsString>>> = RefCell::new(Vec::new());
    let excluded = Cell::new(0usize);
    let mut stats = CopyStats::default();

    let walker = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }

            let skip = exclusions
                .borrow()
                .get(entry.depth() - 1)
                .map_or(false, |names| names.contains(entry.file_name()));
            if skip {
                trace!(path = %entry.path().display(), "excluded");
                excluded.set(excluded.get() + 1);
                return false;
            }

            let is_pruned = pruned_names.contains(entry.file_name())
                && fs::canonicalize(entry.path()).map_or(false, |p| pruned.contains(&p));
            if is_pruned {
                trace!(path = %entry.path().display(), "skipped working path");
            }
            !is_pruned
        });

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| PackError::path_io(entry.path(), outside_source_error()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            if entry.depth() > 0 {
                fs::create_dir(&target).map_err(|e| PackError::path_io(&target, e))?;
            }
            stats.directories += 1;

            let names = exclude(entry.path())?;
            let mut exclusions = exclusions.borrow_mut();
            exclusions.truncate(entry.depth());
            exclusions.push(names);
        } else {
            let bytes = fs::copy(entry.path(), &target)
                .map_err(|e| PackError::path_io(entry.path(), e))?;
            stats.files += 1;
            stats.bytes += bytes;
        }
    }

    stats.excluded = excluded.get();
    debug!(
        source = %source.display(),
        dest = %dest.display(),
        files = stats.files,
        directories = stats.directories,
        excluded = stats.excluded,
        "copied tree"
    );
    Ok(stats)
}

fn outside_source_error() -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        "walked entry is outside the source directory",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PatternSet;
    use crate::ignore::filter::DirectoryFilter;
    use tempfile::TempDir;

    fn no_exclusions(_: &Path) -> Result<BTreeSet<OsString>> {
        Ok(BTreeSet::new())
    }

    #[test]
    fn test_copy_mirrors_contents() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("nested/deeper"))?;
        fs::write(src.join("top.txt"), b"top")?;
        fs::write(src.join("nested/deeper/bin.dat"), [0u8, 159, 146, 150])?;

        let dest = temp_dir.path().join("out");
        let stats = copy_tree(&src, &dest, no_exclusions)?;

        assert_eq!(fs::read(dest.join("top.txt"))?, b"top");
        assert_eq!(fs::read(dest.join("nested/deeper/bin.dat"))?, [0u8, 159, 146, 150]);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.directories, 3);
        assert_eq!(stats.bytes, 7);
        assert_eq!(stats.excluded, 0);
        Ok(())
    }

    #[test]
    fn test_never_descends_into_excluded_directory() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("build"))?;
        fs::write(src.join("keep.txt"), "keep")?;
        fs::write(src.join("build/output.bin"), "bin")?;

        let set: PatternSet = ["build"].into_iter().collect();
        let filter = DirectoryFilter::new(&set);
        let visited = RefCell::new(Vec::new());

        let dest = temp_dir.path().join("out");
        let stats = copy_tree(&src, &dest, |dir| {
            visited.borrow_mut().push(dir.to_path_buf());
            filter.excluded_entries(dir)
        })?;

        assert!(dest.join("keep.txt").is_file());
        assert!(!dest.join("build").exists());
        assert_eq!(stats.files, 1);
        assert_eq!(stats.excluded, 1);
        assert_eq!(*visited.borrow(), vec![src.clone()]);
        Ok(())
    }

    #[test]
    fn test_exclusion_applies_at_every_depth() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("a/b/c"))?;
        fs::write(src.join("x.py"), "")?;
        fs::write(src.join("a/b/c/y.py"), "")?;
        fs::write(src.join("a/b/c/y.lua"), "")?;

        let set: PatternSet = ["*.py"].into_iter().collect();
        let filter = DirectoryFilter::new(&set);
        let dest = temp_dir.path().join("out");
        copy_tree(&src, &dest, |dir| filter.excluded_entries(dir))?;

        assert!(!dest.join("x.py").exists());
        assert!(!dest.join("a/b/c/y.py").exists());
        assert!(dest.join("a/b/c/y.lua").exists());
        Ok(())
    }

    #[test]
    fn test_non_empty_destination_fails() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        fs::create_dir(&src)?;
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest)?;
        fs::write(dest.join("stale"), "")?;

        let err = copy_tree(&src, &dest, no_exclusions).unwrap_err();
        assert!(matches!(err, PackError::DestinationNotEmpty { .. }));
        Ok(())
    }

    #[test]
    fn test_empty_destination_is_accepted() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        fs::create_dir(&src)?;
        fs::write(src.join("f"), "f")?;
        let dest = temp_dir.path().join("out");
        fs::create_dir(&dest)?;

        copy_tree(&src, &dest, no_exclusions)?;
        assert!(dest.join("f").is_file());
        Ok(())
    }

    #[test]
    fn test_destination_inside_source_is_skipped() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path();
        fs::write(src.join("info.json"), "{}")?;

        let dest = src.join("tmp").join("mod_1.0");
        let stats = copy_tree(src, &dest, no_exclusions)?;

        assert!(dest.join("info.json").is_file());
        assert!(!dest.join("tmp").join("mod_1.0").exists());
        assert_eq!(stats.files, 1);
        Ok(())
    }

    #[test]
    fn test_staging_root_inside_source_is_pruned() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path();
        fs::write(src.join("info.json"), "{}")?;
        fs::create_dir(src.join("tmpl"))?;

        let staging_root = src.join("tmp");
        let dest = staging_root.join("mod_1.0");
        let stats = copy_tree_skipping(src, &dest, &[&staging_root], no_exclusions)?;

        assert!(dest.join("info.json").is_file());
        assert!(dest.join("tmpl").is_dir());
        assert!(!dest.join("tmp").exists());
        assert_eq!(stats.excluded, 0);
        Ok(())
    }

    #[test]
    fn test_skipped_file_is_not_copied() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("nested"))?;
        fs::write(src.join("mod_1.0.zip"), "old archive")?;
        fs::write(src.join("nested/mod_1.0.zip"), "shipped asset")?;

        let dest = temp_dir.path().join("out");
        let archive = src.join("mod_1.0.zip");
        let missing = src.join("never-written");
        let stats = copy_tree_skipping(&src, &dest, &[&archive, &missing], no_exclusions)?;

        assert!(!dest.join("mod_1.0.zip").exists());
        assert!(dest.join("nested/mod_1.0.zip").is_file());
        assert_eq!(stats.files, 1);
        Ok(())
    }

    #[test]
    fn test_skipping_the_source_itself_is_ignored() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        fs::create_dir(&src)?;
        fs::write(src.join("f"), "f")?;

        let dest = temp_dir.path().join("out");
        copy_tree_skipping(&src, &dest, &[&src], no_exclusions)?;
        assert!(dest.join("f").is_file());
        Ok(())
    }

    #[test]
    fn test_exclusions_are_scoped_to_their_directory() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        for dir in ["a", "a/deep", "b"] {
            fs::create_dir_all(src.join(dir))?;
            fs::write(src.join(dir).join("x"), "x")?;
            fs::write(src.join(dir).join("y"), "y")?;
        }

        let dest = temp_dir.path().join("out");
        copy_tree(&src, &dest, |dir| {
            let name = if dir.ends_with("a") {
                "x"
            } else if dir.ends_with("b") {
                "y"
            } else {
                return Ok(BTreeSet::new());
            };
            Ok([OsString::from(name)].into_iter().collect())
        })?;

        assert!(!dest.join("a/x").exists());
        assert!(dest.join("a/y").is_file());
        assert!(dest.join("a/deep/x").is_file());
        assert!(dest.join("a/deep/y").is_file());
        assert!(dest.join("b/x").is_file());
        assert!(!dest.join("b/y").exists());
        Ok(())
    }

    #[test]
    fn test_exclude_error_aborts_copy() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("sub"))?;

        let dest = temp_dir.path().join("out");
        let result = copy_tree(&src, &dest, |dir| {
            if dir.ends_with("sub") {
                Err(PackError::path_io(dir, std::io::Error::other("denied")))
            } else {
                Ok(BTreeSet::new())
            }
        });
        assert!(matches!(result, Err(PackError::PathIo { .. })));
        Ok(())
    }
}
