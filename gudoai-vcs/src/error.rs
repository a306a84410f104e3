//! Error types for gudoai-vcs.

use thiserror::Error;

/// Failures of the external version-control tool.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The executable could not be started at all (missing from `PATH`, not executable, ...).
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and exited non-zero. `stderr` is the tool's output, verbatim.
    #[error("{action} failed: {stderr}")]
    Command { action: String, stderr: String },
}

impl VcsError {
    /// Verbatim standard-error text of a failed command, if the tool ran.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            VcsError::Command { stderr, .. } => Some(stderr),
            VcsError::Spawn { .. } => None,
        }
    }
}
