//! CLI command implementations.

pub mod cache;
pub mod refresh;
pub mod summary;

pub use cache::CacheArgs;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use goalfolio_engine::{EngineConfig, PerformanceOrchestrator};
use goalfolio_ext_file::JsonDirectorySource;
use goalfolio_storage::{PerformanceCache, RedbStore};
use goalfolio_traits::{ExecutionMode, GoalId, SystemClock};

use crate::error::{CliError, CliResult};

/// Cache file and the goals to operate on.
#[derive(Args, Debug, Clone)]
pub struct CacheTargetArgs {
    /// Snapshot cache database (redb)
    #[arg(long, env = "GOALFOLIO_CACHE", default_value = "goalfolio-cache.redb")]
    pub cache: PathBuf,

    /// Goal id (repeat for a group)
    #[arg(short, long = "goal", value_name = "ID", required = true)]
    pub goals: Vec<String>,
}

/// Arguments for commands that resolve performance through a source.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Directory of `<goal_id>.json` performance snapshots
    #[arg(short, long, env = "GOALFOLIO_DATA_DIR")]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub target: CacheTargetArgs,
}

/// Loads the engine configuration; `--demo` overrides the file's mode.
pub fn load_config(path: Option<&Path>, demo: bool) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_toml_file(path)
            .map_err(|e| CliError::Config(e.to_string()))?,
        None => EngineConfig::default(),
    };
    if demo {
        config = config.with_mode(ExecutionMode::Demo);
    }
    config
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!(mode = %config.mode, "Loaded engine configuration");
    Ok(config)
}

/// Converts raw `--goal` values, dropping blanks and repeats.
pub fn goal_ids(raw: &[String]) -> CliResult<Vec<GoalId>> {
    let ids: Vec<GoalId> = raw.iter().map(GoalId::new).collect();
    let ids = goalfolio_engine::unique_goal_ids(&ids);
    if ids.is_empty() {
        return Err(CliError::NoGoals);
    }
    Ok(ids)
}

/// Opens the persistent snapshot cache without a source.
pub fn open_cache(config: &EngineConfig, path: &Path) -> Result<PerformanceCache> {
    let store = RedbStore::open(path)
        .with_context(|| format!("Failed to open cache {}", path.display()))?;
    Ok(PerformanceCache::new(
        Arc::new(store),
        Arc::new(SystemClock),
        config.cache.clone(),
        config.mode,
    ))
}

/// Wires a JSON directory source and the redb cache into an orchestrator.
pub fn build_orchestrator(
    config: &EngineConfig,
    data_dir: &Path,
    cache_path: &Path,
) -> Result<PerformanceOrchestrator> {
    let source = JsonDirectorySource::new(data_dir)?;
    let store = RedbStore::open(cache_path)
        .with_context(|| format!("Failed to open cache {}", cache_path.display()))?;

    let orchestrator = PerformanceOrchestrator::builder()
        .with_config(config.clone())
        .with_source(Arc::new(source))
        .with_store(Arc::new(store))
        .build()?;
    Ok(orchestrator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    use serde_json::json;
    use tempfile::TempDir;

    fn write_snapshot(dir: &Path, goal: &str, value: serde_json::Value) {
        fs::write(dir.join(format!("{goal}.json")), value.to_string()).unwrap();
    }

    #[test]
    fn test_goal_ids_trim_and_dedupe() {
        let ids = goal_ids(&[
            " a ".to_string(),
            "b".to_string(),
            "a".to_string(),
            "  ".to_string(),
        ])
        .unwrap();
        assert_eq!(ids, vec![GoalId::new("a"), GoalId::new("b")]);
    }

    #[test]
    fn test_goal_ids_all_blank() {
        let err = goal_ids(&["".to_string(), " ".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::NoGoals));
    }

    #[test]
    fn test_load_config_defaults_and_demo_override() {
        let config = load_config(None, false).unwrap();
        assert_eq!(config.mode, ExecutionMode::Production);

        let config = load_config(None, true).unwrap();
        assert_eq!(config.mode, ExecutionMode::Demo);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("goalfolio.toml");
        fs::write(&path, "request_delay = 0\nmode = \"production\"\n").unwrap();

        let config = load_config(Some(&path), true).unwrap();
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.mode, ExecutionMode::Demo);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml")), false).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }

    #[tokio::test]
    async fn test_orchestrator_over_snapshot_directory() {
        let data = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        write_snapshot(
            data.path(),
            "emergency",
            json!({
                "totalCumulativeReturnAmount": 150.0,
                "gainOrLossTable": { "netInvestment": { "allTimeValue": 5000.0 } },
                "returnsTable": { "twr": { "oneMonthValue": 0.002, "oneYearValue": 0.03 } }
            }),
        );

        let config = EngineConfig::default().with_request_delay(Duration::ZERO);
        let cache_path = cache_dir.path().join("perf.redb");
        let ids = vec![GoalId::new("emergency")];

        {
            let mut orchestrator =
                build_orchestrator(&config, data.path(), &cache_path).unwrap();
            let summary = orchestrator.group_summary(&ids).await.unwrap();
            assert_eq!(summary.window_returns.one_month, Some(0.002));
            assert_eq!(summary.metrics.net_investment_amount, Some(5000.0));
        }

        let cache = open_cache(&config, &cache_path).unwrap();
        assert!(cache.latest_fetched_at(&ids).is_some());
    }

    #[test]
    fn test_build_orchestrator_rejects_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = build_orchestrator(
            &EngineConfig::default(),
            &dir.path().join("missing"),
            &dir.path().join("perf.redb"),
        );
        assert!(result.is_err());
    }
}
