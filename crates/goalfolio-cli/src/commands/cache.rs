//! Cache command implementation.
//!
//! Works on the persisted snapshots directly; no source is contacted.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use goalfolio_engine::{refresh_status_for, EngineConfig, RefreshStatus};
use goalfolio_storage::{CacheLookup, PerformanceCache};
use goalfolio_traits::GoalId;

use crate::cli::OutputFormat;
use crate::commands::summary::refresh_rows;
use crate::commands::{goal_ids, open_cache, CacheTargetArgs};
use crate::output::{format_timestamp, print_header, print_json, print_success, print_table};

/// Arguments for the cache command.
#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands.
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show fetch time and freshness per goal
    Status(CacheTargetArgs),
    /// Delete the persisted snapshots
    Clear(CacheTargetArgs),
}

/// One goal's cache state.
#[derive(Debug, Clone, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct CacheRow {
    #[tabled(rename = "Goal")]
    pub goal: String,
    #[tabled(rename = "State")]
    pub state: &'static str,
    #[tabled(rename = "Fetched")]
    pub fetched_at: String,
}

#[derive(Debug, Serialize)]
struct CacheStatusReport {
    entries: Vec<CacheRow>,
    refresh: RefreshStatus,
}

#[derive(Debug, Serialize)]
struct CacheClearReport {
    goals: Vec<String>,
    cleared: usize,
}

/// Execute the cache command.
pub fn execute(args: CacheArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    match args.action {
        CacheAction::Status(target) => {
            let ids = goal_ids(&target.goals)?;
            let cache = open_cache(config, &target.cache)?;
            // Rows first: in production the group status read drops expired entries.
            let entries = cache_rows(&cache, &ids);
            let refresh = refresh_status_for(&cache, &ids);

            match format {
                OutputFormat::Json => print_json(&CacheStatusReport { entries, refresh })?,
                OutputFormat::Table => {
                    print_header("Cached Snapshots");
                    print_table(&entries);
                    print_header("Refresh");
                    print_table(&refresh_rows(&refresh));
                }
            }
        }
        CacheAction::Clear(target) => {
            let ids = goal_ids(&target.goals)?;
            let cache = open_cache(config, &target.cache)?;
            let cleared = cache.clear(&ids);

            match format {
                OutputFormat::Json => print_json(&CacheClearReport {
                    goals: ids.iter().map(|g| g.to_string()).collect(),
                    cleared,
                })?,
                OutputFormat::Table => {
                    print_success(&format!("Cleared {cleared} cached snapshot(s)"));
                }
            }
        }
    }
    Ok(())
}

/// Probes each goal without evicting stale entries.
pub fn cache_rows(cache: &PerformanceCache, goal_ids: &[GoalId]) -> Vec<CacheRow> {
    goal_ids
        .iter()
        .map(|goal| {
            let (state, fetched_at) = match cache.lookup(goal) {
                CacheLookup::Fresh(entry) => ("fresh", Some(entry.fetched_at)),
                CacheLookup::Stale(entry) => ("stale", Some(entry.fetched_at)),
                CacheLookup::Miss => ("missing", None),
            };
            CacheRow {
                goal: goal.to_string(),
                state,
                fetched_at: format_timestamp(fetched_at),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use goalfolio_analytics::RawPerformanceResponse;
    use goalfolio_storage::{CacheConfig, InMemoryStore};
    use goalfolio_traits::{ExecutionMode, ManualClock};
    use serde_json::json;

    const DAY: i64 = 24 * 60 * 60 * 1000;
    // 2024-06-03T12:30:00Z
    const T0: i64 = 1_717_417_800_000;

    #[test]
    fn test_cache_rows_report_each_state() {
        let clock = Arc::new(ManualClock::new(T0));
        let cache = PerformanceCache::new(
            Arc::new(InMemoryStore::new()),
            clock.clone(),
            CacheConfig::default().with_max_age(Duration::from_millis(7 * DAY as u64)),
            ExecutionMode::Production,
        );
        let response = RawPerformanceResponse::new(json!({ "netInvestment": 100.0 }));

        cache.write(&GoalId::new("old"), &response).unwrap();
        clock.set(T0 + 8 * DAY);
        cache.write(&GoalId::new("new"), &response).unwrap();

        let ids = vec![GoalId::new("old"), GoalId::new("new"), GoalId::new("none")];
        let rows = cache_rows(&cache, &ids);
        let states: Vec<_> = rows.iter().map(|r| r.state).collect();
        assert_eq!(states, vec!["stale", "fresh", "missing"]);
        assert_eq!(rows[0].fetched_at, "2024-06-03 12:30 UTC");
        assert_eq!(rows[2].fetched_at, "n/a");

        // The status read drops the expired entry; the fresh one gates refresh.
        let status = refresh_status_for(&cache, &ids);
        assert_eq!(status.latest_fetched_at, Some(T0 + 8 * DAY));
        assert!(!status.allowed);
        assert_eq!(cache_rows(&cache, &ids)[0].state, "missing");
    }
}
