//! Summary command implementation.
//!
//! Resolves a goal group through the orchestrator and prints its window
//! returns, metrics and refresh status.

use anyhow::Result;
use serde::Serialize;

use goalfolio_analytics::{GroupPerformanceSummary, WindowKey};
use goalfolio_engine::{EngineConfig, RefreshStatus};
use goalfolio_traits::GoalId;

use crate::cli::OutputFormat;
use crate::commands::{build_orchestrator, goal_ids, SessionArgs};
use crate::output::{
    format_timestamp, print_header, print_info, print_json, print_table, KeyValue,
};

/// Shown when no goal produced anything worth reporting.
pub const UNAVAILABLE: &str = "Performance data unavailable.";

/// Machine-readable summary output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub goals: Vec<String>,
    pub summary: Option<GroupPerformanceSummary>,
    pub refresh: RefreshStatus,
}

impl SummaryReport {
    /// Builds a report; an all-empty summary is reported as absent.
    pub fn new(
        goals: &[GoalId],
        summary: Option<GroupPerformanceSummary>,
        refresh: RefreshStatus,
    ) -> Self {
        Self {
            goals: goals.iter().map(|g| g.to_string()).collect(),
            summary: summary.filter(|s| !s.is_unavailable()),
            refresh,
        }
    }
}

/// Execute the summary command.
pub async fn execute(args: SessionArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let ids = goal_ids(&args.target.goals)?;
    let mut orchestrator = build_orchestrator(config, &args.data_dir, &args.target.cache)?;

    let summary = orchestrator.group_summary(&ids).await;
    let refresh = orchestrator.refresh_status(&ids);
    let report = SummaryReport::new(&ids, summary, refresh);

    render(&report, config.chart_window, format)
}

/// Prints a report in the requested format.
pub fn render(report: &SummaryReport, window: WindowKey, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Table => {
            print_header(&format!("Goals: {}", report.goals.join(", ")));
            match &report.summary {
                Some(summary) => print_summary_tables(summary, window),
                None => print_info(UNAVAILABLE),
            }
            print_header("Refresh");
            print_table(&refresh_rows(&report.refresh));
        }
    }
    Ok(())
}

fn print_summary_tables(summary: &GroupPerformanceSummary, window: WindowKey) {
    print_header("Window Returns");
    print_table(&window_rows(summary));

    print_header("Metrics");
    print_table(&metric_rows(summary));

    print_header(&format!("Chart ({})", window.label()));
    match (summary.window_series.first(), summary.window_series.last()) {
        (Some(first), Some(last)) => println!(
            "{} points from {} ({:.2}) to {} ({:.2})",
            summary.window_series.len(),
            first.date,
            first.amount,
            last.date,
            last.amount
        ),
        _ => println!("No chart points in window."),
    }
}

/// One row per lookback window, in display order.
pub fn window_rows(summary: &GroupPerformanceSummary) -> Vec<KeyValue> {
    summary
        .window_returns
        .iter()
        .map(|(key, value)| KeyValue::from_percent(key.label(), value))
        .collect()
}

/// Group metrics.
pub fn metric_rows(summary: &GroupPerformanceSummary) -> Vec<KeyValue> {
    let m = &summary.metrics;
    vec![
        KeyValue::from_percent("Total return", m.total_return_percent),
        KeyValue::from_percent("Simple return", m.simple_return_percent),
        KeyValue::from_percent("Time-weighted return", m.twr_percent),
        KeyValue::from_percent("Annualised IRR", m.annualised_irr_percent),
        KeyValue::from_amount("Total return amount", m.total_return_amount),
        KeyValue::from_amount("Net fees", m.net_fees_amount),
        KeyValue::from_amount("Net investment", m.net_investment_amount),
        KeyValue::from_amount("Ending balance", m.ending_balance_amount),
    ]
}

/// Refresh cooldown state.
pub fn refresh_rows(status: &RefreshStatus) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Last fetched", format_timestamp(status.latest_fetched_at)),
        KeyValue::new("Refresh available", format_timestamp(status.available_at)),
        KeyValue::new("Status", status.label.clone()),
    ]
}
