//! Runtime settings for a command invocation.

use std::path::{Path, PathBuf};

use gudoai_registry::DEFAULT_DB_FILE;
use gudoai_vcs::git::DEFAULT_MAIN_BRANCH;

/// Where projects live and which tools and files the orchestrator uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory project directories are created under.
    pub root: PathBuf,
    /// Registry database file.
    pub registry_db: PathBuf,
    /// Branch merges land on; also the initial branch of new repositories.
    pub main_branch: String,
    /// Version-control executable.
    pub git_program: String,
}

impl Settings {
    /// Defaults rooted at `root`: `<root>/.gudoai_api_db.json`, `master`, `git`.
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            registry_db: root.join(DEFAULT_DB_FILE),
            root,
            main_branch: DEFAULT_MAIN_BRANCH.to_string(),
            git_program: "git".to_string(),
        }
    }

    pub fn with_registry_db(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_db = path.into();
        self
    }

    pub fn with_main_branch(mut self, branch: impl Into<String>) -> Self {
        self.main_branch = branch.into();
        self
    }

    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_rooted() {
        let s = Settings::in_dir("/work");
        assert_eq!(s.registry_db, PathBuf::from("/work/.gudoai_api_db.json"));
        assert_eq!(s.main_branch, "master");
        assert_eq!(s.git_program, "git");
    }

    #[test]
    fn overrides_apply() {
        let s = Settings::in_dir("/work")
            .with_registry_db("/tmp/db.json")
            .with_main_branch("main")
            .with_git_program("/usr/bin/git");
        assert_eq!(s.registry_db, PathBuf::from("/tmp/db.json"));
        assert_eq!(s.main_branch, "main");
        assert_eq!(s.git_program, "/usr/bin/git");
        assert_eq!(s.root(), Path::new("/work"));
    }
}
