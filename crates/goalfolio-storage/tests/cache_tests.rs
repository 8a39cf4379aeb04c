//! Integration tests for the performance cache over the redb backend.

use std::sync::Arc;
use std::time::Duration;

use goalfolio_analytics::RawPerformanceResponse;
use goalfolio_storage::prelude::*;
use goalfolio_traits::{ExecutionMode, GoalId, ManualClock};
use serde_json::json;
use tempfile::tempdir;

const HOUR: i64 = 60 * 60 * 1000;
const T0: i64 = 1_700_000_000_000;

fn payload(amount: f64) -> RawPerformanceResponse {
    RawPerformanceResponse::new(json!({
        "endingBalanceAmount": amount,
        "timeSeries": { "data": [ { "date": "2024-06-03", "amount": amount } ] }
    }))
}

#[test]
fn test_entries_survive_reopen_and_expire() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.redb");
    let clock = Arc::new(ManualClock::new(T0));
    let goal = GoalId::new("retirement");

    {
        let cache = PerformanceCache::new(
            Arc::new(RedbStore::open(&path).unwrap()),
            clock.clone(),
            CacheConfig::default(),
            ExecutionMode::Production,
        );
        cache.write(&goal, &payload(1_000.0)).unwrap();
    }

    let store = Arc::new(RedbStore::open(&path).unwrap());
    let cache = PerformanceCache::new(
        store.clone(),
        clock.clone(),
        CacheConfig::default(),
        ExecutionMode::Production,
    );

    let entry = cache.read(&goal, false).unwrap();
    assert_eq!(entry.response, payload(1_000.0));
    assert_eq!(entry.response.ending_balance(), Some(1_000.0));

    clock.advance(7 * 24 * HOUR);
    assert!(cache.read(&goal, false).is_none());
    assert!(store.get("gpv_performance_retirement").unwrap().is_none());
}

#[test]
fn test_custom_prefix_and_short_max_age() {
    let dir = tempdir().unwrap();
    let store = Arc::new(RedbStore::open(dir.path().join("cache.redb")).unwrap());
    let clock = Arc::new(ManualClock::new(T0));
    let config = CacheConfig::default()
        .with_key_prefix("perf:")
        .with_max_age(Duration::from_secs(3600))
        .with_refresh_min_age(Duration::from_secs(60));
    let cache = PerformanceCache::new(store.clone(), clock.clone(), config, ExecutionMode::Demo);

    let goals = [GoalId::new("a"), GoalId::new("b")];
    for goal in &goals {
        cache.write(goal, &payload(10.0));
    }
    assert_eq!(store.keys_with_prefix("perf:").unwrap(), vec!["perf:a", "perf:b"]);

    clock.advance(HOUR / 2);
    assert!(cache.is_refresh_allowed(&goals));

    // Past max age: demo mode keeps the stale copy available as a fallback.
    clock.advance(HOUR);
    assert!(matches!(cache.lookup(&goals[0]), CacheLookup::Stale(_)));
    assert!(cache.read(&goals[0], true).is_some());
    assert_eq!(cache.latest_fetched_at(&goals), None);
    assert_eq!(store.keys_with_prefix("perf:").unwrap().len(), 2);

    // Only an explicit fresh-only read evicts.
    assert!(cache.read(&goals[0], false).is_none());
    assert_eq!(store.keys_with_prefix("perf:").unwrap(), vec!["perf:b"]);
}

#[test]
fn test_clear_removes_only_requested_goals() {
    let dir = tempdir().unwrap();
    let store = Arc::new(RedbStore::open(dir.path().join("cache.redb")).unwrap());
    let cache = PerformanceCache::new(
        store.clone(),
        Arc::new(ManualClock::new(T0)),
        CacheConfig::default(),
        ExecutionMode::Production,
    );

    let keep = GoalId::new("keep");
    let drop = GoalId::new("drop");
    cache.write(&keep, &payload(1.0));
    cache.write(&drop, &payload(2.0));

    assert_eq!(cache.clear(&[drop.clone(), GoalId::new("  ")]), 1);
    assert!(cache.read(&drop, false).is_none());
    assert!(cache.read(&keep, false).is_some());
}
