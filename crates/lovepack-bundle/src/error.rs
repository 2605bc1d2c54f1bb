//! Error types for bundle operations.

use crate::Target;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while archiving or composing bundles.
#[derive(Debug, Error)]
pub enum BundleError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error reported while walking the project directory.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Required file or directory does not exist.
    #[error("Missing required file: {}", .0.display())]
    MissingFile(PathBuf),

    /// Path cannot be stored in the archive.
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Target cannot be built yet.
    #[error("Target not supported yet: {0}")]
    UnsupportedTarget(Target),
}

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configuration and filesystem precondition checks.
    Validate,
    /// `.love` archive creation.
    Archive,
    /// Platform bundle composition for one target.
    Compose(Target),
    /// Removal of the intermediate archive.
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validate => write!(f, "validate"),
            Self::Archive => write!(f, "archive"),
            Self::Compose(target) => write!(f, "compose ({target})"),
            Self::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// A [`BundleError`] tagged with the pipeline stage that produced it.
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct PipelineError {
    /// Stage that failed.
    pub stage: Stage,
    /// Underlying cause.
    #[source]
    pub source: BundleError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: BundleError) -> Self {
        Self { stage, source }
    }

    /// True when every build artifact was produced and only cleanup failed.
    #[must_use]
    pub fn is_cleanup_only(&self) -> bool {
        self.stage == Stage::Cleanup
    }
}

/// Extension for tagging bundle results with a stage.
pub(crate) trait StageExt<T> {
    fn stage(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> StageExt<T> for Result<T, BundleError> {
    fn stage(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError::new(stage, source))
    }
}
