//! Error types for gudoai-orchestrator.

use std::path::PathBuf;

use thiserror::Error;

use gudoai_core::MetadataError;
use gudoai_registry::StoreError;
use gudoai_vcs::VcsError;

/// Fatal failures of a lifecycle command. Registry rejections and merge
/// conflicts are not errors; they come back inside the command's outcome.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// `init` target already exists.
    #[error("Project '{name}' already exists at {path}")]
    AlreadyExists { name: String, path: PathBuf },

    /// The project directory does not exist.
    #[error("Project '{name}' not found at {path}")]
    ProjectNotFound { name: String, path: PathBuf },

    /// Metadata missing, unparsable or unwritable.
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// The version-control tool failed.
    #[error("version control error: {0}")]
    Vcs(#[from] VcsError),

    /// The registry's backing store failed.
    #[error("registry store error: {0}")]
    Store(#[from] StoreError),

    /// A lifecycle precondition was violated.
    #[error(transparent)]
    State(#[from] StateError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Registration-state preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Project already registered with the API.")]
    AlreadyRegistered,

    #[error("Project not registered with the API.")]
    NotRegistered,
}

/// Convenience constructor for [`OrchestratorError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> OrchestratorError {
    OrchestratorError::Io {
        path: path.into(),
        source,
    }
}
