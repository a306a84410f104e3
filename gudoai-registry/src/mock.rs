//! The registry endpoints: register, sync and status.
//!
//! State is loaded from the store once, at [`MockRegistry::open`], and the
//! whole map is written back after every accepted mutation. Rejected calls
//! never write.

use gudoai_core::{ProjectId, RegistryRecord};

use crate::api::{ApiResponse, RegisterAck, RegistryError, Reply, StatusCode, SyncAck};
use crate::error::StoreError;
use crate::store::{RegistryMap, RegistryStore};

/// Payload of a registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub project_id: ProjectId,
    pub project_name: String,
    pub commit_hash: String,
    pub version: u64,
    pub description: String,
}

/// Payload of a sync call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub project_id: ProjectId,
    pub commit_hash: String,
    pub version: u64,
    pub description: String,
    pub file_manifest: Vec<String>,
}

/// In-process stand-in for the remote project registry.
#[derive(Debug)]
pub struct MockRegistry<S> {
    store: S,
    projects: RegistryMap,
}

impl<S: RegistryStore> MockRegistry<S> {
    /// Load the full registry state from `store`.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let projects = store.load()?;
        tracing::debug!(projects = projects.len(), "registry loaded");
        Ok(Self { store, projects })
    }

    /// Every record currently held, keyed by project id.
    pub fn projects(&self) -> &RegistryMap {
        &self.projects
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `409` if the id is taken, else insert a fresh record and answer `201`.
    pub fn register(&mut self, req: Registration) -> Result<ApiResponse<RegisterAck>, StoreError> {
        if self.projects.contains_key(&req.project_id) {
            tracing::info!(project_id = %req.project_id, "registration rejected: already registered");
            return Ok(Err(RegistryError::new(
                StatusCode::Conflict,
                "Project ID already registered",
            )));
        }

        let record = RegistryRecord::registered(
            req.project_id.clone(),
            req.project_name,
            req.commit_hash,
            req.version,
            req.description,
        );
        let mut next = self.projects.clone();
        next.insert(req.project_id.clone(), record);
        self.commit(next)?;

        tracing::info!(project_id = %req.project_id, "project registered");
        Ok(Ok(Reply {
            status: StatusCode::Created,
            body: RegisterAck {
                message: "Project registered".to_string(),
                registry_id: req.project_id,
            },
        }))
    }

    /// `404` for unknown ids, `400` unless `version` is strictly newer than the
    /// stored one, else overwrite the record's mutable fields and answer `200`.
    pub fn sync(&mut self, req: SyncRequest) -> Result<ApiResponse<SyncAck>, StoreError> {
        let Some(current) = self.projects.get(&req.project_id) else {
            return Ok(Err(not_found()));
        };
        if req.version <= current.version {
            tracing::info!(
                project_id = %req.project_id,
                sent = req.version,
                stored = current.version,
                "sync rejected: stale version"
            );
            return Ok(Err(RegistryError::new(
                StatusCode::BadRequest,
                "Stale data: metadata_version must be greater than current.",
            )));
        }

        let mut updated = current.clone();
        updated.commit_hash = req.commit_hash.clone();
        updated.version = req.version;
        updated.description = req.description;
        updated.file_manifest = req.file_manifest;
        updated.last_synced_commit = Some(req.commit_hash.clone());

        let mut next = self.projects.clone();
        next.insert(req.project_id.clone(), updated);
        self.commit(next)?;

        tracing::info!(project_id = %req.project_id, version = req.version, "project synced");
        Ok(Ok(Reply {
            status: StatusCode::Ok,
            body: SyncAck {
                message: "Project state synchronized".to_string(),
                last_synced_commit: req.commit_hash,
            },
        }))
    }

    /// `404` for unknown ids, else the full record with `200`.
    pub fn get_status(&self, project_id: &ProjectId) -> ApiResponse<RegistryRecord> {
        match self.projects.get(project_id) {
            Some(record) => Ok(Reply {
                status: StatusCode::Ok,
                body: record.clone(),
            }),
            None => Err(not_found()),
        }
    }

    /// Persist `next` and adopt it only once the store accepted it.
    fn commit(&mut self, next: RegistryMap) -> Result<(), StoreError> {
        self.store.save(&next)?;
        self.projects = next;
        Ok(())
    }
}

fn not_found() -> RegistryError {
    RegistryError::new(StatusCode::NotFound, "Project not found")
}
