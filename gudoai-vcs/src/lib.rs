//! Version-control adapter.
//!
//! [`VersionControl`] is the narrow seam the orchestrator talks to; [`GitCli`]
//! implements it by shelling out to `git`. Every call blocks until the tool exits.

mod error;
pub mod git;

use std::path::Path;

pub use error::VcsError;
pub use git::GitCli;

/// Prefix applied to every branch created through the adapter.
pub const FEATURE_PREFIX: &str = "feature/";

/// Full branch name for a feature called `name`.
pub fn feature_branch(name: &str) -> String {
    format!("{FEATURE_PREFIX}{name}")
}

/// Result of merging a feature branch into the main branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The merge completed; the tool created any commit it needed.
    Merged { branch: String },
    /// The merge stopped; the working tree is left in the tool's conflict state.
    Conflict { branch: String, detail: String },
}

impl MergeOutcome {
    pub fn is_merged(&self) -> bool {
        matches!(self, MergeOutcome::Merged { .. })
    }

    pub fn branch(&self) -> &str {
        match self {
            MergeOutcome::Merged { branch } | MergeOutcome::Conflict { branch, .. } => branch,
        }
    }
}

/// Operations the orchestrator needs from a version-control tool.
///
/// `repo` is always the project directory.
pub trait VersionControl {
    /// Initialise a repository in `repo`.
    fn init(&self, repo: &Path) -> Result<(), VcsError>;

    /// Stage `pathspec` and commit it with `message`.
    fn commit_all(&self, repo: &Path, pathspec: &str, message: &str) -> Result<(), VcsError>;

    /// Create `feature/<name>` and switch to it. Returns the full branch name.
    fn create_branch(&self, repo: &Path, name: &str) -> Result<String, VcsError>;

    /// Switch to the main branch and merge `feature/<name>` into it.
    ///
    /// Failing to switch is an error; a failed merge is a [`MergeOutcome::Conflict`].
    fn merge_to_main(&self, repo: &Path, name: &str) -> Result<MergeOutcome, VcsError>;

    /// Identifier of the commit `HEAD` points at.
    fn current_commit_hash(&self, repo: &Path) -> Result<String, VcsError>;

    /// Every tracked file, in the tool's order.
    fn tracked_files(&self, repo: &Path) -> Result<Vec<String>, VcsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_branch_is_prefixed() {
        assert_eq!(feature_branch("login"), "feature/login");
    }

    #[test]
    fn merge_outcome_accessors() {
        let ok = MergeOutcome::Merged { branch: "feature/a".into() };
        let bad = MergeOutcome::Conflict {
            branch: "feature/b".into(),
            detail: "CONFLICT".into(),
        };
        assert!(ok.is_merged());
        assert!(!bad.is_merged());
        assert_eq!(bad.branch(), "feature/b");
    }

    #[test]
    fn command_error_keeps_stderr_verbatim() {
        let err = VcsError::Command {
            action: "git checkout -b feature/x".into(),
            stderr: "fatal: a branch named 'feature/x' already exists\n".into(),
        };
        assert_eq!(
            err.stderr(),
            Some("fatal: a branch named 'feature/x' already exists\n")
        );
        assert!(err.to_string().contains("already exists"));
    }
}
