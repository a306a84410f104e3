//! Mock project registry — a local, file-backed stand-in for a remote API.
//!
//! - [`store`] — [`RegistryStore`] repository interface and its backends
//! - [`api`] — status codes, replies and [`RegistryError`] rejections
//! - [`mock`] — [`MockRegistry`], the register / sync / status endpoints

pub mod api;
mod error;
pub mod mock;
pub mod store;

pub use api::{ApiResponse, RegisterAck, RegistryError, Reply, StatusCode, SyncAck};
pub use error::StoreError;
pub use mock::{MockRegistry, Registration, SyncRequest};
pub use store::{JsonFileStore, MemoryStore, RegistryMap, RegistryStore, DEFAULT_DB_FILE};
