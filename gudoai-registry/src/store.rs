//! Registry persistence.
//!
//! The whole registry is one map, loaded in one piece and written back in one
//! piece. [`JsonFileStore`] keeps it in a single JSON document (by default
//! `.gudoai_api_db.json` in the working directory); writes use the same atomic
//! `.tmp` + rename pattern as the metadata store.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gudoai_core::{ProjectId, RegistryRecord};

use crate::error::{io_err, StoreError};

/// Default registry file name.
pub const DEFAULT_DB_FILE: &str = ".gudoai_api_db.json";

/// Project id → record.
pub type RegistryMap = BTreeMap<ProjectId, RegistryRecord>;

/// Repository interface over the registry's persisted state.
pub trait RegistryStore {
    /// Read the full map. A store that was never written is an empty map.
    fn load(&self) -> Result<RegistryMap, StoreError>;

    /// Replace the full map.
    fn save(&self, projects: &RegistryMap) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// Registry map stored as one 2-space indented JSON object.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/.gudoai_api_db.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_DB_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryStore for JsonFileStore {
    /// Absent file → empty map. An unreadable document is logged and treated
    /// as empty; the next successful mutation overwrites it.
    fn load(&self) -> Result<RegistryMap, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RegistryMap::new()),
            Err(e) => return Err(io_err(&self.path, e)),
        };
        match serde_json::from_str(&contents) {
            Ok(projects) => Ok(projects),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to load projects database, starting empty"
                );
                Ok(RegistryMap::new())
            }
        }
    }

    fn save(&self, projects: &RegistryMap) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        }
        let json = serde_json::to_string_pretty(projects)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Volatile store for tests and dry runs. Counts saves so callers can assert
/// that rejected calls never touch persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: RefCell<RegistryMap>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: RegistryMap) -> Self {
        Self {
            projects: RefCell::new(projects),
            saves: Cell::new(0),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn snapshot(&self) -> RegistryMap {
        self.projects.borrow().clone()
    }
}

impl RegistryStore for MemoryStore {
    fn load(&self) -> Result<RegistryMap, StoreError> {
        Ok(self.projects.borrow().clone())
    }

    fn save(&self, projects: &RegistryMap) -> Result<(), StoreError> {
        *self.projects.borrow_mut() = projects.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: RegistryStore + ?Sized> RegistryStore for &S {
    fn load(&self) -> Result<RegistryMap, StoreError> {
        (**self).load()
    }

    fn save(&self, projects: &RegistryMap) -> Result<(), StoreError> {
        (**self).save(projects)
    }
}
