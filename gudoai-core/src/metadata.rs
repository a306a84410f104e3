//! Per-project metadata store.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   <project_name>/
//!     gudoai_meta.json   (2-space indented JSON, committed to the project repo)
//! ```
//!
//! Every function takes the project directory explicitly; nothing here reads
//! the process working directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, MetadataError};
use crate::types::ProjectMetadata;

/// File name of the metadata document inside a project directory.
pub const META_FILE_NAME: &str = "gudoai_meta.json";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<project_dir>/gudoai_meta.json` — pure, no I/O.
pub fn meta_path_at(project_dir: &Path) -> PathBuf {
    project_dir.join(META_FILE_NAME)
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load the metadata document of the project at `project_dir`.
///
/// Returns `MetadataError::NotFound` if the file is absent and
/// `MetadataError::InvalidFormat` if it does not parse as metadata.
pub fn load_at(project_dir: &Path) -> Result<ProjectMetadata, MetadataError> {
    let path = meta_path_at(project_dir);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(MetadataError::NotFound { path });
        }
        Err(e) => return Err(io_err(path, e)),
    };
    serde_json::from_str(&contents).map_err(|source| MetadataError::InvalidFormat { path, source })
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Replace the metadata document of the project at `project_dir`.
///
/// Write flow: serialize → `gudoai_meta.json.tmp` sibling → `rename`.
/// The project directory must already exist.
pub fn save_at(project_dir: &Path, meta: &ProjectMetadata) -> Result<(), MetadataError> {
    let path = meta_path_at(project_dir);
    let tmp_path = path.with_file_name(format!("{META_FILE_NAME}.tmp"));

    let json = serde_json::to_string_pretty(meta)?;
    std::fs::write(&tmp_path, json).map_err(|e| io_err(&tmp_path, e))?;
    std::fs::rename(&tmp_path, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
