//! [`VersionControl`] backed by the `git` command-line tool.

use std::path::Path;
use std::process::{Command, Output};

use crate::error::VcsError;
use crate::{feature_branch, MergeOutcome, VersionControl};

/// Default branch merges land on, and the initial branch of new repositories.
pub const DEFAULT_MAIN_BRANCH: &str = "master";

/// Shells out to a `git` executable with the project directory as working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    main_branch: String,
}

impl GitCli {
    pub fn new(program: impl Into<String>, main_branch: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            main_branch: main_branch.into(),
        }
    }

    pub fn main_branch(&self) -> &str {
        &self.main_branch
    }

    fn output(&self, repo: &Path, args: &[&str]) -> Result<Output, VcsError> {
        tracing::debug!(program = %self.program, ?args, repo = %repo.display(), "running vcs command");
        Command::new(&self.program)
            .args(args)
            .current_dir(repo)
            .output()
            .map_err(|source| VcsError::Spawn {
                program: self.program.clone(),
                source,
            })
    }

    /// Run and require a zero exit; returns stdout.
    fn run(&self, repo: &Path, args: &[&str]) -> Result<String, VcsError> {
        let output = self.output(repo, args)?;
        if !output.status.success() {
            return Err(self.failure(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn failure(&self, args: &[&str], output: &Output) -> VcsError {
        VcsError::Command {
            action: format!("{} {}", self.program, args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git", DEFAULT_MAIN_BRANCH)
    }
}

impl VersionControl for GitCli {
    fn init(&self, repo: &Path) -> Result<(), VcsError> {
        let initial = format!("--initial-branch={}", self.main_branch);
        self.run(repo, &["init", &initial])?;
        Ok(())
    }

    fn commit_all(&self, repo: &Path, pathspec: &str, message: &str) -> Result<(), VcsError> {
        self.run(repo, &["add", pathspec])?;
        self.run(repo, &["commit", "-m", message])?;
        Ok(())
    }

    fn create_branch(&self, repo: &Path, name: &str) -> Result<String, VcsError> {
        let branch = feature_branch(name);
        self.run(repo, &["checkout", "-b", &branch])?;
        Ok(branch)
    }

    fn merge_to_main(&self, repo: &Path, name: &str) -> Result<MergeOutcome, VcsError> {
        let branch = feature_branch(name);
        self.run(repo, &["checkout", &self.main_branch])?;

        let output = self.output(repo, &["merge", &branch])?;
        if output.status.success() {
            return Ok(MergeOutcome::Merged { branch });
        }
        // git reports conflicts on stdout and usage problems on stderr.
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            stderr.into_owned()
        };
        tracing::warn!(branch = %branch, "merge stopped");
        Ok(MergeOutcome::Conflict { branch, detail })
    }

    fn current_commit_hash(&self, repo: &Path) -> Result<String, VcsError> {
        Ok(self.run(repo, &["rev-parse", "HEAD"])?.trim().to_string())
    }

    fn tracked_files(&self, repo: &Path) -> Result<Vec<String>, VcsError> {
        let stdout = self.run(repo, &["ls-files"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_targets_master() {
        assert_eq!(GitCli::default().main_branch(), "master");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = TempDir::new().expect("tempdir");
        let git = GitCli::new("gudoai-definitely-not-a-binary", "master");
        let err = git.init(dir.path()).unwrap_err();
        assert!(matches!(err, VcsError::Spawn { .. }), "got: {err}");
        assert!(err.stderr().is_none());
    }
}
