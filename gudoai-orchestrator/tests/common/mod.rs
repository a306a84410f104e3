//! In-memory `VersionControl` used by the orchestrator tests.
//!
//! Repositories are keyed by directory. Commit hashes are sequential
//! (`c0001`, `c0002`, ...) unless a test pins `HEAD` with [`FakeVcs::set_head`].

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use gudoai_vcs::{feature_branch, MergeOutcome, VcsError, VersionControl};

#[derive(Debug, Default)]
struct FakeRepo {
    branches: BTreeSet<String>,
    current: String,
    head: Option<String>,
    tracked: BTreeSet<String>,
    log: Vec<(String, String)>,
}

#[derive(Debug, Default)]
struct FakeState {
    repos: HashMap<PathBuf, FakeRepo>,
    conflicting: HashSet<String>,
    calls: Vec<String>,
    next_commit: u32,
}

#[derive(Debug)]
pub struct FakeVcs {
    main_branch: String,
    state: RefCell<FakeState>,
}

impl Default for FakeVcs {
    fn default() -> Self {
        Self {
            main_branch: "master".to_string(),
            state: RefCell::new(FakeState::default()),
        }
    }
}

fn failure(action: &str, stderr: &str) -> VcsError {
    VcsError::Command {
        action: action.to_string(),
        stderr: stderr.to_string(),
    }
}

impl FakeVcs {
    /// Make merges of `feature/<name>` report a conflict.
    pub fn conflict_on(&self, name: &str) {
        self.state.borrow_mut().conflicting.insert(feature_branch(name));
    }

    /// Pin the `HEAD` hash of `repo` (the next commit moves it again).
    pub fn set_head(&self, repo: &Path, hash: &str) {
        if let Some(r) = self.state.borrow_mut().repos.get_mut(repo) {
            r.head = Some(hash.to_string());
        }
    }

    /// Commit messages of `repo`, oldest first.
    pub fn messages(&self, repo: &Path) -> Vec<String> {
        self.state
            .borrow()
            .repos
            .get(repo)
            .map(|r| r.log.iter().map(|(_, m)| m.clone()).collect())
            .unwrap_or_default()
    }

    pub fn current_branch(&self, repo: &Path) -> Option<String> {
        self.state.borrow().repos.get(repo).map(|r| r.current.clone())
    }

    /// Every adapter call so far, as `op` strings.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl VersionControl for FakeVcs {
    fn init(&self, repo: &Path) -> Result<(), VcsError> {
        self.record("init".into());
        let mut state = self.state.borrow_mut();
        let mut r = FakeRepo {
            current: self.main_branch.clone(),
            ..FakeRepo::default()
        };
        r.branches.insert(self.main_branch.clone());
        state.repos.insert(repo.to_path_buf(), r);
        Ok(())
    }

    fn commit_all(&self, repo: &Path, pathspec: &str, message: &str) -> Result<(), VcsError> {
        self.record(format!("commit:{message}"));
        let mut state = self.state.borrow_mut();
        state.next_commit += 1;
        let hash = format!("c{:04}", state.next_commit);
        let r = state
            .repos
            .get_mut(repo)
            .ok_or_else(|| failure("commit", "fatal: not a git repository"))?;
        r.tracked.insert(pathspec.to_string());
        r.head = Some(hash.clone());
        r.log.push((hash, message.to_string()));
        Ok(())
    }

    fn create_branch(&self, repo: &Path, name: &str) -> Result<String, VcsError> {
        self.record(format!("branch:{name}"));
        let branch = feature_branch(name);
        let mut state = self.state.borrow_mut();
        let r = state
            .repos
            .get_mut(repo)
            .ok_or_else(|| failure("checkout", "fatal: not a git repository"))?;
        if !r.branches.insert(branch.clone()) {
            return Err(failure(
                &format!("git checkout -b {branch}"),
                &format!("fatal: a branch named '{branch}' already exists\n"),
            ));
        }
        r.current = branch.clone();
        Ok(branch)
    }

    fn merge_to_main(&self, repo: &Path, name: &str) -> Result<MergeOutcome, VcsError> {
        self.record(format!("merge:{name}"));
        let branch = feature_branch(name);
        let mut state = self.state.borrow_mut();
        let conflicting = state.conflicting.contains(&branch);
        let r = state
            .repos
            .get_mut(repo)
            .ok_or_else(|| failure("checkout", "fatal: not a git repository"))?;
        r.current = self.main_branch.clone();
        if conflicting || !r.branches.contains(&branch) {
            return Ok(MergeOutcome::Conflict {
                branch,
                detail: "CONFLICT (content): Merge conflict in gudoai_meta.json".into(),
            });
        }
        Ok(MergeOutcome::Merged { branch })
    }

    fn current_commit_hash(&self, repo: &Path) -> Result<String, VcsError> {
        self.record("rev-parse".into());
        self.state
            .borrow()
            .repos
            .get(repo)
            .and_then(|r| r.head.clone())
            .ok_or_else(|| failure("git rev-parse HEAD", "fatal: ambiguous argument 'HEAD'"))
    }

    fn tracked_files(&self, repo: &Path) -> Result<Vec<String>, VcsError> {
        self.record("ls-files".into());
        self.state
            .borrow()
            .repos
            .get(repo)
            .map(|r| r.tracked.iter().cloned().collect())
            .ok_or_else(|| failure("git ls-files", "fatal: not a git repository"))
    }
}
