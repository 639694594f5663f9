//! One packaging run: manifest, patterns, filtered staging copy, zip
//!
//! ```rust,no_run
//! use modpack::{PackOptions, Packager};
//! use std::path::Path;
//!
//! let report = Packager::new(PackOptions::default()).run(Path::new("./my-mod"))?;
//! println!("wrote {}", report.archive.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::archive::{remove_stale_archive, write_zip, ArchiveStats};
use crate::config::PackOptions;
use crate::core::error::{PackError, Result};
use crate::core::manifest::ModManifest;
use crate::ignore::filter::DirectoryFilter;
use crate::ignore::git_config::GitConfigLookup;
use crate::ignore::resolver::PatternResolver;
use crate::staging::{copy_tree_skipping, CopyStats, StagingTree};
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct PackReport {
    pub manifest: ModManifest,
    /// Path of the written `<name>_<version>.zip`
    pub archive: PathBuf,
    /// Whether an older archive of the same name was replaced
    pub replaced_previous: bool,
    /// Size of the resolved pattern set
    pub patterns: usize,
    pub copy: CopyStats,
    pub archive_stats: ArchiveStats,
}

/// Packages mod directories into zip archives
pub struct Packager {
    options: PackOptions,
    resolver: PatternResolver,
}

impl Packager {
    pub fn new(options: PackOptions) -> Self {
        let resolver =
            PatternResolver::with_lookup(GitConfigLookup::with_program(options.git_program.clone()))
                .supplementary(options.supplementary_patterns.clone());
        Self { options, resolver }
    }

    /// Use a custom resolver. Its own lookup and supplementary list take the
    /// place of `options.git_program` and `options.supplementary_patterns`.
    pub fn with_resolver(options: PackOptions, resolver: PatternResolver) -> Self {
        Self { options, resolver }
    }

    pub fn options(&self) -> &PackOptions {
        &self.options
    }

    /// Package `mod_dir` into `<output_dir>/<name>_<version>.zip`.
    ///
    /// The staging tree is removed on every exit path. Configuration problems
    /// (bad directory, missing or invalid manifest) are detected before
    /// anything is written, and a previous archive is only replaced once the
    /// staged copy is complete.
    pub fn run(&self, mod_dir: &Path) -> Result<PackReport> {
        if !mod_dir.is_dir() {
            return Err(PackError::invalid_target_directory(mod_dir));
        }
        let manifest = ModManifest::load(mod_dir)?;
        let stem = manifest.stem();
        info!(name = %manifest.name, version = %manifest.version, dir = %mod_dir.display(), "packaging mod");

        let patterns = self.resolver.resolve(mod_dir)?;
        let filter = DirectoryFilter::new(&patterns);

        let staging = StagingTree::create(&self.options.staging_root, &stem)?;
        let archive = self.options.output_dir.join(manifest.archive_file_name());

        // Neither the staging root nor a previous archive may end up in the
        // package when they live inside the mod directory
        let skip = [staging.root(), archive.as_path()];
        let copy = copy_tree_skipping(mod_dir, staging.path(), &skip, |dir| {
            filter.excluded_entries(dir)
        })?;

        let replaced_previous = remove_stale_archive(&archive)?;
        let archive_stats = write_zip(staging.root(), &stem, &archive)?;
        drop(staging);

        info!(
            archive = %archive.display(),
            files = archive_stats.files,
            excluded = copy.excluded,
            "package written"
        );

        Ok(PackReport {
            manifest,
            archive,
            replaced_previous,
            patterns: patterns.len(),
            copy,
            archive_stats,
        })
    }
}
