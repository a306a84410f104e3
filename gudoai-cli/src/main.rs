//! GUDOAI — Grand Unified DevOps Orchestrator & API Interrogator.
//!
//! # Usage
//!
//! ```text
//! gudoai init <project_name>
//! gudoai update_meta <project_name> --description <text>
//! gudoai create_feature_branch <project_name> <branch_name>
//! gudoai merge_to_main <project_name> <feature_branch_name>
//! gudoai register_project <project_name>
//! gudoai sync_project <project_name>
//! gudoai check_api_status <project_name> [--json]
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{
    branch::{BranchArgs, MergeArgs},
    init::InitArgs,
    meta::UpdateMetaArgs,
    registry::{ProjectArgs, StatusArgs},
};
use gudoai_orchestrator::Settings;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "gudoai",
    version,
    about = "GUDOAI - Grand Unified DevOps Orchestrator & API Interrogator",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory projects are created in and looked up from (default: current directory).
    #[arg(long, global = true, env = "GUDOAI_ROOT", value_name = "DIR")]
    root: Option<PathBuf>,

    /// Registry database file (default: <root>/.gudoai_api_db.json).
    #[arg(long = "api-db", global = true, env = "GUDOAI_API_DB", value_name = "FILE")]
    api_db: Option<PathBuf>,

    /// Branch feature branches are merged into.
    #[arg(long, global = true, env = "GUDOAI_MAIN_BRANCH", default_value = "master")]
    main_branch: String,

    /// Version-control executable.
    #[arg(long = "git", global = true, env = "GUDOAI_GIT", default_value = "git")]
    git_program: String,

    /// Log debug detail to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "snake_case")]
enum Commands {
    /// Initialize a new micro-project.
    Init(InitArgs),

    /// Update project description.
    UpdateMeta(UpdateMetaArgs),

    /// Create a feature branch.
    CreateFeatureBranch(BranchArgs),

    /// Merge feature branch into main.
    MergeToMain(MergeArgs),

    /// Register project with external API.
    RegisterProject(ProjectArgs),

    /// Sync project state with API.
    SyncProject(ProjectArgs),

    /// Check project status from API.
    CheckApiStatus(StatusArgs),
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("could not determine current directory")?,
        };
        let mut settings = Settings::in_dir(root)
            .with_main_branch(self.main_branch.clone())
            .with_git_program(self.git_program.clone());
        if let Some(db) = &self.api_db {
            settings = settings.with_registry_db(db.clone());
        }
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "[ERROR]".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    tracing::debug!(?settings, "resolved settings");
    match cli.command {
        Commands::Init(args) => args.run(&settings),
        Commands::UpdateMeta(args) => args.run(&settings),
        Commands::CreateFeatureBranch(args) => args.run(&settings),
        Commands::MergeToMain(args) => args.run(&settings),
        Commands::RegisterProject(args) => commands::registry::register(args, &settings),
        Commands::SyncProject(args) => commands::registry::sync(args, &settings),
        Commands::CheckApiStatus(args) => args.run(&settings),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("GUDOAI_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
