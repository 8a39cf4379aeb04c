//! Refresh command implementation.
//!
//! Clears the group's cached snapshots and reloads them, unless the newest
//! snapshot is still inside the refresh cooldown.

use anyhow::Result;
use serde::Serialize;

use goalfolio_engine::{EngineConfig, RefreshOutcome};

use crate::cli::OutputFormat;
use crate::commands::summary::{render, SummaryReport};
use crate::commands::{build_orchestrator, goal_ids, SessionArgs};
use crate::output::{print_json, print_success, print_warning};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshReport {
    refreshed: bool,
    #[serde(flatten)]
    report: SummaryReport,
}

/// Execute the refresh command.
pub async fn execute(args: SessionArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let ids = goal_ids(&args.target.goals)?;
    let mut orchestrator = build_orchestrator(config, &args.data_dir, &args.target.cache)?;

    match orchestrator.refresh(&ids).await {
        RefreshOutcome::Refreshed(summary) => {
            let status = orchestrator.refresh_status(&ids);
            let report = SummaryReport::new(&ids, summary, status);
            match format {
                OutputFormat::Json => print_json(&RefreshReport {
                    refreshed: true,
                    report,
                })?,
                OutputFormat::Table => {
                    print_success("Cleared cached performance and reloaded");
                    render(&report, config.chart_window, format)?;
                }
            }
        }
        RefreshOutcome::Cooldown(status) => match format {
            OutputFormat::Json => print_json(&RefreshReport {
                refreshed: false,
                report: SummaryReport::new(&ids, None, status),
            })?,
            OutputFormat::Table => print_warning(&status.label),
        },
    }

    Ok(())
}
