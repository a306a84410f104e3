//! `gudoai create_feature_branch` and `gudoai merge_to_main`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use gudoai_core::ProjectName;
use gudoai_orchestrator::Settings;
use gudoai_vcs::MergeOutcome;

/// Create a feature branch.
#[derive(Args, Debug)]
pub struct BranchArgs {
    /// Name of the project.
    pub project_name: String,

    /// Name of the feature branch; created as `feature/<branch_name>`.
    pub branch_name: String,
}

impl BranchArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let orchestrator = super::open(settings)?;
        let branch = orchestrator
            .create_feature_branch(&ProjectName::from(self.project_name), &self.branch_name)?;
        println!("Created and switched to branch: {branch}");
        Ok(())
    }
}

/// Merge feature branch into main.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Name of the project.
    pub project_name: String,

    /// Name of the feature branch to merge, without the `feature/` prefix.
    pub feature_branch_name: String,
}

impl MergeArgs {
    /// A conflict is reported on stdout; the command still succeeds.
    pub fn run(self, settings: &Settings) -> Result<()> {
        let orchestrator = super::open(settings)?;
        let outcome = orchestrator
            .merge_to_main(&ProjectName::from(self.project_name), &self.feature_branch_name)?;
        match outcome {
            MergeOutcome::Merged { branch } => {
                println!(
                    "{} Branch '{branch}' merged into {}.",
                    "✓".green(),
                    settings.main_branch
                );
            }
            MergeOutcome::Conflict { branch, detail } => {
                println!(
                    "{} Conflicts found merging '{branch}'. Merge not continued.",
                    "⚠".yellow()
                );
                for line in detail.lines().filter(|l| !l.trim().is_empty()) {
                    println!("  {line}");
                }
                println!("[ERROR] Merge failed due to conflicts.");
            }
        }
        Ok(())
    }
}
