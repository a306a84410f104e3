//! One module per group of `gudoai` subcommands.

pub mod branch;
pub mod init;
pub mod meta;
pub mod registry;

use anyhow::{Context, Result};
use gudoai_orchestrator::{Orchestrator, Settings};
use gudoai_registry::JsonFileStore;
use gudoai_vcs::GitCli;

/// Wire the orchestrator for `settings`, loading the registry database.
pub(crate) fn open(settings: &Settings) -> Result<Orchestrator<GitCli, JsonFileStore>> {
    Orchestrator::open(settings).with_context(|| {
        format!(
            "failed to open registry database '{}'",
            settings.registry_db.display()
        )
    })
}
