//! `gudoai register_project`, `gudoai sync_project` and `gudoai check_api_status`.
//!
//! Registry rejections are printed and the command exits successfully; only
//! local failures (metadata, git, registry file I/O) are errors.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use gudoai_core::{ProjectName, RegistryRecord};
use gudoai_orchestrator::{RegisterOutcome, Settings, StatusOutcome, StatusReport, SyncOutcome};

/// A project name argument.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Name of the project.
    pub project_name: String,
}

pub fn register(args: ProjectArgs, settings: &Settings) -> Result<()> {
    let mut orchestrator = super::open(settings)?;
    match orchestrator.register_project(&ProjectName::from(args.project_name))? {
        RegisterOutcome::Registered { commit_hash, metadata } => {
            println!("{} Project successfully registered with the API.", "✓".green());
            println!("  commit:  {commit_hash}");
            println!("  version: {}", metadata.version);
        }
        RegisterOutcome::Rejected(rejection) => {
            println!(
                "{} Failed to register project: {}",
                "✗".red(),
                rejection.error
            );
        }
    }
    Ok(())
}

pub fn sync(args: ProjectArgs, settings: &Settings) -> Result<()> {
    let mut orchestrator = super::open(settings)?;
    match orchestrator.sync_project(&ProjectName::from(args.project_name))? {
        SyncOutcome::Synced {
            commit_hash,
            file_manifest,
        } => {
            println!("{} Project state synchronized with API.", "✓".green());
            println!("  commit: {commit_hash}");
            println!("  files:  {}", file_manifest.len());
        }
        SyncOutcome::Rejected(rejection) => {
            println!("{} Failed to sync project: {}", "✗".red(), rejection.error);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// check_api_status
// ---------------------------------------------------------------------------

/// Check project status from API.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Name of the project.
    pub project_name: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson<'a> {
    project: &'a str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote: Option<&'a RegistryRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_last_sync_commit: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashes_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "field")]
    field: &'static str,
    #[tabled(rename = "value")]
    value: String,
}

impl StatusArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let orchestrator = super::open(settings)?;
        let outcome = orchestrator.check_api_status(&ProjectName::from(self.project_name.clone()))?;
        if self.json {
            return print_json(&self.project_name, &outcome);
        }

        match outcome {
            StatusOutcome::Found(report) => print_table(&report),
            StatusOutcome::Rejected(rejection) => {
                println!(
                    "{} Failed to get project status: {}",
                    "✗".red(),
                    rejection.error
                );
            }
        }
        Ok(())
    }
}

fn print_json(project: &str, outcome: &StatusOutcome) -> Result<()> {
    let payload = match outcome {
        StatusOutcome::Found(report) => StatusJson {
            project,
            status: 200,
            remote: Some(&report.remote),
            local_last_sync_commit: report.local_hash.as_deref(),
            hashes_match: Some(report.hashes_match()),
            error: None,
        },
        StatusOutcome::Rejected(rejection) => StatusJson {
            project,
            status: rejection.status.as_u16(),
            remote: None,
            local_last_sync_commit: None,
            hashes_match: None,
            error: Some(&rejection.error),
        },
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(report: &StatusReport) {
    let remote = &report.remote;
    println!("Project status '{}':", report.project_name.to_string().bold());

    let rows = vec![
        FieldRow {
            field: "Project ID",
            value: remote.project_id.to_string(),
        },
        FieldRow {
            field: "Name",
            value: remote.project_name.clone(),
        },
        FieldRow {
            field: "Last Synced Commit",
            value: or_na(remote.last_synced_commit.as_deref()),
        },
        FieldRow {
            field: "Metadata Version",
            value: remote.version.to_string(),
        },
        FieldRow {
            field: "Description",
            value: remote.description.clone(),
        },
        FieldRow {
            field: "Files",
            value: remote.file_manifest.len().to_string(),
        },
        FieldRow {
            field: "Is Deployed",
            value: remote.is_deployed.to_string(),
        },
    ];
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if report.hashes_match() {
        println!("{} Commit hash matches between local and API.", "✓".green());
    } else {
        println!(
            "{} Commit hash differs between local ({}) and API ({}).",
            "⚠".yellow(),
            or_na(report.local_hash.as_deref()),
            or_na(remote.last_synced_commit.as_deref())
        );
    }
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or("N/A").to_string()
}
