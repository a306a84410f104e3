//! Project lifecycle orchestration.
//!
//! Composes the metadata store, the version-control adapter and the mock
//! registry into the user-facing verbs: init, update_meta, branch, merge,
//! register, sync and status.

mod error;
pub mod orchestrator;
pub mod settings;

pub use error::{OrchestratorError, StateError};
pub use orchestrator::{
    InitReport, Orchestrator, RegisterOutcome, StatusOutcome, StatusReport, SyncOutcome,
};
pub use settings::Settings;
