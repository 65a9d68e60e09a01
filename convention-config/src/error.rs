//! Error types for convention configuration loading

use convention_resources::ResourceError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Service file not found
    #[error("Service file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Failed to read service file
    #[error("Failed to read service file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Service file format not supported
    #[error("Unsupported service file format: {format}")]
    UnsupportedFormat { format: String },

    /// Service file content could not be parsed
    #[error("Failed to parse service file {}: {message}", path.display())]
    Document { path: PathBuf, message: String },

    /// Layered configuration could not be extracted
    #[error("Failed to parse configuration: {source}")]
    Parse {
        #[source]
        source: Box<figment::Error>,
    },

    /// Aggregation failed
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Parse {
            source: Box::new(error),
        }
    }
}

impl ConfigError {
    /// Create a Document error from any displayable cause.
    pub fn document(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::Document {
            path: path.into(),
            message: cause.to_string(),
        }
    }
}
