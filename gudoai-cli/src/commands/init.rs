//! `gudoai init <project_name>`

use anyhow::Result;
use clap::Args;

use gudoai_core::ProjectName;
use gudoai_orchestrator::Settings;

/// Initialize a new micro-project.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project to initialize; also its directory name.
    pub project_name: String,
}

impl InitArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let orchestrator = super::open(settings)?;
        let report = orchestrator.init_project(&ProjectName::from(self.project_name.clone()))?;

        println!("Created directory: {}", self.project_name);
        println!("Created metadata file in: {}", report.meta_path.display());
        println!("Initialized Git repository");
        println!("Performed initial Git commit");
        println!(
            "✓ Project '{}' ready (id {})",
            self.project_name, report.metadata.project_id
        );
        Ok(())
    }
}
