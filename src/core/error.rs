//! Error types for modpack

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for packaging and sprite operations
#[derive(Error, Debug)]
pub enum PackError {
    /// Configuration errors (reported to the user, nothing is written)
    #[error("\"{path}\" is not a valid directory.")]
    InvalidTargetDirectory { path: PathBuf },

    #[error("\"{dir}\" does not contain a \"info.json\" file.")]
    ManifestMissing { dir: PathBuf },

    #[error("Invalid manifest {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    /// Staging errors
    #[error("Destination directory is not empty: {path}")]
    DestinationNotEmpty { path: PathBuf },

    #[error("Staging directory already exists and is not empty: {path}")]
    StagingExists { path: PathBuf },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error at {path}: {source}")]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal failed: {0}")]
    Traversal(#[from] walkdir::Error),

    /// Archive errors
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Version-control errors that are not a plain "key not set"
    #[error("Unexpected git output: {reason}")]
    GitOutput { reason: String },

    /// Sprite sheet errors
    #[error("No files found matching pattern {pattern}")]
    NoTilesFound { pattern: String },

    #[error("{tool} failed ({status}): {stderr}")]
    ImageToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Invalid tile pattern: {0}")]
    TilePattern(#[from] glob::PatternError),

    #[error("Tile lookup failed: {0}")]
    TileGlob(#[from] glob::GlobError),
}

impl PackError {
    /// Create a new invalid target directory error
    pub fn invalid_target_directory(path: impl Into<PathBuf>) -> Self {
        Self::InvalidTargetDirectory { path: path.into() }
    }

    /// Create a new manifest missing error
    pub fn manifest_missing(dir: impl Into<PathBuf>) -> Self {
        Self::ManifestMissing { dir: dir.into() }
    }

    /// Create a new manifest invalid error
    pub fn manifest_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ManifestInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Attach a path to an I/O error
    pub fn path_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PathIo {
            path: path.into(),
            source,
        }
    }

    /// Create a new git output error
    pub fn git_output(reason: impl Into<String>) -> Self {
        Self::GitOutput {
            reason: reason.into(),
        }
    }

    /// Whether this error means the run could not even be configured
    /// (bad target directory or manifest). These are reported as plain
    /// user messages rather than failures with a cause chain.
    pub fn is_configuration_missing(&self) -> bool {
        matches!(
            self,
            Self::InvalidTargetDirectory { .. }
                | Self::ManifestMissing { .. }
                | Self::ManifestInvalid { .. }
        )
    }
}

/// Result type alias for modpack operations
pub type Result<T> = std::result::Result<T, PackError>;
