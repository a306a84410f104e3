//! `gudoai update_meta <project_name> --description <text>`

use anyhow::Result;
use clap::Args;

use gudoai_core::ProjectName;
use gudoai_orchestrator::Settings;

/// Update project description.
#[derive(Args, Debug)]
pub struct UpdateMetaArgs {
    /// Name of the project.
    pub project_name: String,

    /// New description for the project.
    #[arg(long)]
    pub description: String,
}

impl UpdateMetaArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let orchestrator = super::open(settings)?;
        let meta = orchestrator
            .update_metadata(&ProjectName::from(self.project_name.clone()), &self.description)?;
        println!(
            "Metadata for '{}' updated. Version: {}",
            self.project_name, meta.version
        );
        Ok(())
    }
}
