//! Domain types shared by the metadata store, the registry and the orchestrator.
//!
//! Field names are part of the on-disk JSON format; do not rename them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Description written into a freshly initialised project.
pub const DEFAULT_DESCRIPTION: &str = "New GUDOAI managed project.";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed project name; also the project's directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque project identifier, generated once at `init` and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Generate a fresh random identifier (UUID v4, hyphenated).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Project metadata
// ---------------------------------------------------------------------------

/// Contents of `<project>/gudoai_meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project_id: ProjectId,
    pub version: u64,
    pub description: String,
    pub last_api_sync_commit_hash: Option<String>,
    #[serde(default)]
    pub api_registered: bool,
}

impl ProjectMetadata {
    /// Metadata for a brand new project: version 0, unregistered, never synced.
    pub fn new() -> Self {
        Self {
            project_id: ProjectId::generate(),
            version: 0,
            description: DEFAULT_DESCRIPTION.to_string(),
            last_api_sync_commit_hash: None,
            api_registered: false,
        }
    }

    /// Replace the description and advance the version by one.
    pub fn update_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.version += 1;
    }

    /// Record a registry registration made at `commit_hash`.
    ///
    /// Marks the project registered and advances the version by one.
    pub fn mark_registered(&mut self, commit_hash: impl Into<String>) {
        self.api_registered = true;
        self.last_api_sync_commit_hash = Some(commit_hash.into());
        self.version += 1;
    }

    /// Record a successful registry sync at `commit_hash`. The version is left alone.
    pub fn mark_synced(&mut self, commit_hash: impl Into<String>) {
        self.last_api_sync_commit_hash = Some(commit_hash.into());
    }
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Registry record
// ---------------------------------------------------------------------------

/// One project entry in the mock registry's store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub project_id: ProjectId,
    pub project_name: String,
    pub commit_hash: String,
    pub version: u64,
    pub description: String,
    #[serde(default)]
    pub file_manifest: Vec<String>,
    pub last_synced_commit: Option<String>,
    #[serde(default)]
    pub is_deployed: bool,
}

impl RegistryRecord {
    /// A freshly registered record: empty manifest, never synced, not deployed.
    pub fn registered(
        project_id: ProjectId,
        project_name: impl Into<String>,
        commit_hash: impl Into<String>,
        version: u64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            project_name: project_name.into(),
            commit_hash: commit_hash.into(),
            version,
            description: description.into(),
            file_manifest: vec![],
            last_synced_commit: None,
            is_deployed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
