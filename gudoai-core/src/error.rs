//! Error types for gudoai-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from metadata store operations.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata file (or its project directory) does not exist.
    #[error("metadata not found at {path}")]
    NotFound { path: PathBuf },

    /// The metadata file exists but is not a valid metadata document.
    #[error("file {path} is not valid JSON: {source}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`MetadataError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> MetadataError {
    MetadataError::Io {
        path: path.into(),
        source,
    }
}
