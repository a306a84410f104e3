//! GUDOAI core library — domain types, project metadata persistence, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes, [`ProjectMetadata`] and [`RegistryRecord`]
//! - [`error`] — [`MetadataError`]
//! - [`metadata`] — load / save of `gudoai_meta.json`

pub mod error;
pub mod metadata;
pub mod types;

pub use error::MetadataError;
pub use types::{ProjectId, ProjectMetadata, ProjectName, RegistryRecord};
