//! The lifecycle verbs.
//!
//! Every command is one synchronous pass: read metadata, talk to the VCS
//! and/or the registry, write metadata, commit. For `register_project` and
//! `sync_project` the registry call always happens first; local metadata is
//! only touched once the registry has accepted and persisted the change.

use std::path::{Path, PathBuf};

use gudoai_core::{
    metadata::{self, META_FILE_NAME},
    ProjectMetadata, ProjectName, RegistryRecord,
};
use gudoai_registry::{
    JsonFileStore, MockRegistry, Registration, RegistryError, RegistryStore, StoreError,
    SyncRequest,
};
use gudoai_vcs::{GitCli, MergeOutcome, VersionControl};

use crate::error::{io_err, OrchestratorError, StateError};
use crate::settings::Settings;

pub const INITIAL_COMMIT_MESSAGE: &str = "GUDOAI: Initial project setup";
pub const REGISTERED_COMMIT_MESSAGE: &str = "GUDOAI: Project registered to API";
pub const SYNCED_COMMIT_MESSAGE: &str = "GUDOAI: Project synced with API";

fn updated_commit_message(version: u64) -> String {
    format!("GUDOAI: Updated metadata - version {version}")
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What `init` created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub project_dir: PathBuf,
    pub meta_path: PathBuf,
    pub metadata: ProjectMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The registry answered 201 and local metadata now records it.
    Registered {
        commit_hash: String,
        metadata: ProjectMetadata,
    },
    /// The registry refused; local metadata is untouched.
    Rejected(RegistryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The registry answered 200 and local metadata records the synced commit.
    Synced {
        commit_hash: String,
        file_manifest: Vec<String>,
    },
    /// The registry refused; local metadata is untouched.
    Rejected(RegistryError),
}

/// Remote record next to the local view of the last sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub project_name: ProjectName,
    pub remote: RegistryRecord,
    pub local_hash: Option<String>,
}

impl StatusReport {
    /// Local `last_api_sync_commit_hash` equals remote `last_synced_commit`.
    pub fn hashes_match(&self) -> bool {
        self.local_hash == self.remote.last_synced_commit
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    Found(StatusReport),
    Rejected(RegistryError),
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives the lifecycle commands for projects living under `root`.
#[derive(Debug)]
pub struct Orchestrator<V, S> {
    root: PathBuf,
    vcs: V,
    registry: MockRegistry<S>,
}

impl Orchestrator<GitCli, JsonFileStore> {
    /// Production wiring: `git` subprocesses and the JSON registry file.
    pub fn open(settings: &Settings) -> Result<Self, StoreError> {
        let vcs = GitCli::new(settings.git_program.clone(), settings.main_branch.clone());
        let registry = MockRegistry::open(JsonFileStore::new(settings.registry_db.clone()))?;
        Ok(Self::new(settings.root.clone(), vcs, registry))
    }
}

impl<V: VersionControl, S: RegistryStore> Orchestrator<V, S> {
    pub fn new(root: impl Into<PathBuf>, vcs: V, registry: MockRegistry<S>) -> Self {
        Self {
            root: root.into(),
            vcs,
            registry,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn registry(&self) -> &MockRegistry<S> {
        &self.registry
    }

    /// `<root>/<project_name>` — pure, no I/O.
    pub fn project_dir(&self, name: &ProjectName) -> PathBuf {
        self.root.join(&name.0)
    }

    // -----------------------------------------------------------------------
    // init / update_meta
    // -----------------------------------------------------------------------

    /// Create the project directory, its metadata, a repository and the first commit.
    pub fn init_project(&self, name: &ProjectName) -> Result<InitReport, OrchestratorError> {
        let dir = self.project_dir(name);
        if dir.exists() {
            return Err(OrchestratorError::AlreadyExists {
                name: name.0.clone(),
                path: dir,
            });
        }
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;

        let meta = ProjectMetadata::new();
        metadata::save_at(&dir, &meta)?;
        self.vcs.init(&dir)?;
        self.vcs.commit_all(&dir, META_FILE_NAME, INITIAL_COMMIT_MESSAGE)?;

        tracing::info!(project = %name, project_id = %meta.project_id, "project initialised");
        Ok(InitReport {
            meta_path: metadata::meta_path_at(&dir),
            project_dir: dir,
            metadata: meta,
        })
    }

    /// Replace the description, bump the version by one, persist and commit.
    pub fn update_metadata(
        &self,
        name: &ProjectName,
        description: &str,
    ) -> Result<ProjectMetadata, OrchestratorError> {
        let dir = self.project_dir(name);
        let mut meta = metadata::load_at(&dir)?;
        meta.update_description(description);
        metadata::save_at(&dir, &meta)?;
        self.vcs
            .commit_all(&dir, META_FILE_NAME, &updated_commit_message(meta.version))?;

        tracing::info!(project = %name, version = meta.version, "metadata updated");
        Ok(meta)
    }

    // -----------------------------------------------------------------------
    // Branching
    // -----------------------------------------------------------------------

    /// Create and switch to `feature/<branch>`. Returns the full branch name.
    pub fn create_feature_branch(
        &self,
        name: &ProjectName,
        branch: &str,
    ) -> Result<String, OrchestratorError> {
        let dir = self.existing_project_dir(name)?;
        let full = self.vcs.create_branch(&dir, branch)?;
        tracing::info!(project = %name, branch = %full, "feature branch created");
        Ok(full)
    }

    /// Merge `feature/<branch>` into the main branch. A conflict is an outcome,
    /// not an error.
    pub fn merge_to_main(
        &self,
        name: &ProjectName,
        branch: &str,
    ) -> Result<MergeOutcome, OrchestratorError> {
        let dir = self.existing_project_dir(name)?;
        let outcome = self.vcs.merge_to_main(&dir, branch)?;
        tracing::info!(project = %name, branch = %outcome.branch(), merged = outcome.is_merged(), "merge finished");
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    /// Register the project at its current `HEAD`.
    ///
    /// Sends the current local version; on acceptance the local version is
    /// bumped past it, so the next sync is strictly newer than the registry's
    /// copy.
    pub fn register_project(
        &mut self,
        name: &ProjectName,
    ) -> Result<RegisterOutcome, OrchestratorError> {
        let dir = self.project_dir(name);
        let mut meta = metadata::load_at(&dir)?;
        if meta.api_registered {
            return Err(StateError::AlreadyRegistered.into());
        }

        let commit_hash = self.vcs.current_commit_hash(&dir)?;
        let response = self.registry.register(Registration {
            project_id: meta.project_id.clone(),
            project_name: name.0.clone(),
            commit_hash: commit_hash.clone(),
            version: meta.version,
            description: meta.description.clone(),
        })?;
        if let Err(rejection) = response {
            tracing::warn!(project = %name, status = %rejection.status, "registration rejected");
            return Ok(RegisterOutcome::Rejected(rejection));
        }

        meta.mark_registered(commit_hash.clone());
        metadata::save_at(&dir, &meta)?;
        self.vcs
            .commit_all(&dir, META_FILE_NAME, REGISTERED_COMMIT_MESSAGE)?;

        tracing::info!(project = %name, commit = %commit_hash, version = meta.version, "project registered");
        Ok(RegisterOutcome::Registered {
            commit_hash,
            metadata: meta,
        })
    }

    /// Push the current `HEAD`, description and tracked files to the registry.
    ///
    /// The local version is sent as-is and not bumped.
    pub fn sync_project(&mut self, name: &ProjectName) -> Result<SyncOutcome, OrchestratorError> {
        let dir = self.project_dir(name);
        let mut meta = metadata::load_at(&dir)?;
        if !meta.api_registered {
            return Err(StateError::NotRegistered.into());
        }

        let commit_hash = self.vcs.current_commit_hash(&dir)?;
        let file_manifest = self.vcs.tracked_files(&dir)?;
        let response = self.registry.sync(SyncRequest {
            project_id: meta.project_id.clone(),
            commit_hash: commit_hash.clone(),
            version: meta.version,
            description: meta.description.clone(),
            file_manifest: file_manifest.clone(),
        })?;
        if let Err(rejection) = response {
            tracing::warn!(project = %name, status = %rejection.status, "sync rejected");
            return Ok(SyncOutcome::Rejected(rejection));
        }

        meta.mark_synced(commit_hash.clone());
        metadata::save_at(&dir, &meta)?;
        self.vcs.commit_all(&dir, META_FILE_NAME, SYNCED_COMMIT_MESSAGE)?;

        tracing::info!(project = %name, commit = %commit_hash, files = file_manifest.len(), "project synced");
        Ok(SyncOutcome::Synced {
            commit_hash,
            file_manifest,
        })
    }

    /// Fetch the registry record and compare its last synced commit with the local one.
    pub fn check_api_status(&self, name: &ProjectName) -> Result<StatusOutcome, OrchestratorError> {
        let meta = metadata::load_at(&self.project_dir(name))?;
        match self.registry.get_status(&meta.project_id) {
            Ok(reply) => Ok(StatusOutcome::Found(StatusReport {
                project_name: name.clone(),
                remote: reply.body,
                local_hash: meta.last_api_sync_commit_hash,
            })),
            Err(rejection) => {
                tracing::warn!(project = %name, status = %rejection.status, "status lookup rejected");
                Ok(StatusOutcome::Rejected(rejection))
            }
        }
    }

    fn existing_project_dir(&self, name: &ProjectName) -> Result<PathBuf, OrchestratorError> {
        let dir = self.project_dir(name);
        if !dir.is_dir() {
            return Err(OrchestratorError::ProjectNotFound {
                name: name.0.clone(),
                path: dir,
            });
        }
        Ok(dir)
    }
}
