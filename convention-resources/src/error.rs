//! Error types for resource aggregation.

use convention_directory::DirectoryError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ResourceError.
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Fatal errors raised while aggregating resource definitions.
///
/// Any of these aborts the whole aggregation; no partial result is returned.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A convention lacks its `pattern` or `folders` entry.
    #[error("Include \"{convention}\" is missing pattern or folders.")]
    MissingPatternOrFolders { convention: String },

    /// A resource file loaded to an empty mapping.
    #[error("Resource definition missing content: {}", path.display())]
    MissingContent { path: PathBuf },

    /// A resource file loaded to something other than a mapping.
    #[error("Resource definition {} must be a mapping, found {found}", path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    /// A resource file could not be parsed.
    #[error("Failed to parse resource definition {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A computed content source failed.
    #[error("Failed to compute resource definition {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// Recursion went deeper than the configured limit.
    #[error("Folder {} is nested deeper than the limit of {limit}", path.display())]
    DepthLimitExceeded { path: PathBuf, limit: usize },

    /// Listing or pattern compilation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl ResourceError {
    /// Create a Parse error from any displayable cause.
    pub fn parse(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: cause.to_string(),
        }
    }

    /// Create a Load error from any displayable cause.
    pub fn load(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::Load {
            path: path.into(),
            message: cause.to_string(),
        }
    }
}
