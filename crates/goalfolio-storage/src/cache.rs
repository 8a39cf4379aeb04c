//! Persistent performance snapshot cache.
//!
//! Each goal's latest upstream payload is stored as
//! `{"fetchedAt": <epoch millis>, "response": {...}}` under
//! `<key_prefix><goal_id>`. Entries are checked for shape and freshness on
//! every read; stale and malformed entries are deleted on read rather than
//! by a background sweep.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use goalfolio_analytics::RawPerformanceResponse;
use goalfolio_traits::config::duration_millis;
use goalfolio_traits::{Clock, ExecutionMode, GoalId};

use crate::adapter::KeyValueStore;

/// Default key prefix.
pub const DEFAULT_KEY_PREFIX: &str = "gpv_performance_";

/// Default maximum entry age (7 days).
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default manual refresh cooldown (24 hours).
pub const DEFAULT_REFRESH_MIN_AGE: Duration = Duration::from_secs(24 * 60 * 60);

// =============================================================================
// CONFIG
// =============================================================================

/// Cache tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entries at least this old are stale.
    #[serde(with = "duration_millis")]
    pub max_age: Duration,

    /// Minimum entry age before a manual refresh is allowed.
    #[serde(with = "duration_millis")]
    pub refresh_min_age: Duration,

    /// Prefix prepended to goal ids to form store keys.
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            refresh_min_age: DEFAULT_REFRESH_MIN_AGE,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl CacheConfig {
    /// Set the maximum entry age.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set the refresh cooldown.
    pub fn with_refresh_min_age(mut self, min_age: Duration) -> Self {
        self.refresh_min_age = min_age;
        self
    }

    /// Set the key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}

fn as_millis_i64(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

// =============================================================================
// PREDICATES
// =============================================================================

/// True when an entry fetched at `fetched_at` is younger than `max_age`.
///
/// Exactly `max_age` old is stale; a zero `max_age` makes everything stale.
pub fn is_cache_fresh(fetched_at: i64, max_age: Duration, now: i64) -> bool {
    let max_age = as_millis_i64(max_age);
    if max_age <= 0 {
        return false;
    }
    now.saturating_sub(fetched_at) < max_age
}

/// True when at least `min_age` has passed since `fetched_at`.
///
/// Independent of freshness. False without a timestamp or with a zero
/// `min_age`.
pub fn is_refresh_allowed(fetched_at: Option<i64>, min_age: Duration, now: i64) -> bool {
    let min_age = as_millis_i64(min_age);
    match fetched_at {
        Some(fetched_at) if min_age > 0 => now.saturating_sub(fetched_at) >= min_age,
        _ => false,
    }
}

// =============================================================================
// ENTRY
// =============================================================================

/// A cached snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// When the response was fetched, in epoch milliseconds.
    pub fetched_at: i64,
    /// The upstream payload.
    pub response: RawPerformanceResponse,
}

impl CacheEntry {
    /// Parses a stored payload, rejecting anything without a positive
    /// numeric `fetchedAt` and an object `response`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut value: Value = serde_json::from_str(raw).ok()?;
        let fetched_at = value
            .get("fetchedAt")
            .and_then(Value::as_f64)
            .filter(|t| t.is_finite() && *t > 0.0)?;
        let response = value.get_mut("response").map(Value::take)?;
        let response = RawPerformanceResponse::from_object(response)?;
        Some(Self {
            fetched_at: fetched_at as i64,
            response,
        })
    }
}

/// Outcome of a cache probe.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Entry younger than the maximum age.
    Fresh(CacheEntry),
    /// Well-formed entry past the maximum age. Still in the store.
    Stale(CacheEntry),
    /// Nothing usable.
    Miss,
}

// =============================================================================
// CACHE
// =============================================================================

/// Per-goal snapshot cache over a [`KeyValueStore`].
///
/// Store failures never propagate: reads degrade to a miss and writes are
/// skipped, both with a warning.
pub struct PerformanceCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    mode: ExecutionMode,
}

impl PerformanceCache {
    /// Create a cache.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: CacheConfig,
        mode: ExecutionMode,
    ) -> Self {
        Self {
            store,
            clock,
            config,
            mode,
        }
    }

    /// Cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Execution mode.
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Current time from the injected clock.
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Store key for a goal.
    pub fn key(&self, goal_id: &GoalId) -> String {
        format!("{}{}", self.config.key_prefix, goal_id)
    }

    /// Stores `response` stamped with the current time.
    ///
    /// Returns the stored entry, or `None` if the write was skipped.
    /// A clock at or before the epoch skips the write, since such an entry
    /// would be discarded as malformed on read.
    pub fn write(&self, goal_id: &GoalId, response: &RawPerformanceResponse) -> Option<CacheEntry> {
        let now = self.clock.now_millis();
        if now <= 0 {
            warn!(goal_id = %goal_id, now, "Skipping performance cache write with non-positive timestamp");
            return None;
        }
        let entry = CacheEntry {
            fetched_at: now,
            response: response.clone(),
        };
        let payload = match serde_json::to_string(&entry) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(goal_id = %goal_id, error = %e, "Failed to encode performance cache entry");
                return None;
            }
        };
        match self.store.set(&self.key(goal_id), &payload) {
            Ok(()) => {
                debug!(goal_id = %goal_id, fetched_at = entry.fetched_at, "Performance cache written");
                Some(entry)
            }
            Err(e) => {
                warn!(goal_id = %goal_id, error = %e, "Failed to write performance cache");
                None
            }
        }
    }

    /// Probes the entry for a goal without deleting stale data.
    ///
    /// Malformed entries are deleted.
    pub fn lookup(&self, goal_id: &GoalId) -> CacheLookup {
        let key = self.key(goal_id);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CacheLookup::Miss,
            Err(e) => {
                warn!(goal_id = %goal_id, error = %e, "Failed to read performance cache");
                return CacheLookup::Miss;
            }
        };

        let Some(entry) = CacheEntry::parse(&raw) else {
            debug!(goal_id = %goal_id, "Discarding malformed performance cache entry");
            self.delete_key(&key);
            return CacheLookup::Miss;
        };

        if is_cache_fresh(entry.fetched_at, self.config.max_age, self.clock.now_millis()) {
            CacheLookup::Fresh(entry)
        } else {
            CacheLookup::Stale(entry)
        }
    }

    /// Reads a goal's entry.
    ///
    /// Stale entries are deleted and reported as absent, unless
    /// `ignore_freshness` is set in demo mode, in which case they are
    /// returned and kept. Production mode always enforces freshness.
    pub fn read(&self, goal_id: &GoalId, ignore_freshness: bool) -> Option<CacheEntry> {
        match self.lookup(goal_id) {
            CacheLookup::Fresh(entry) => {
                debug!(goal_id = %goal_id, "Performance cache hit");
                Some(entry)
            }
            CacheLookup::Stale(entry) if ignore_freshness && self.mode.is_relaxed() => {
                debug!(goal_id = %goal_id, fetched_at = entry.fetched_at, "Serving stale performance cache");
                Some(entry)
            }
            CacheLookup::Stale(_) => {
                debug!(goal_id = %goal_id, "Performance cache expired");
                self.delete_key(&self.key(goal_id));
                None
            }
            CacheLookup::Miss => {
                debug!(goal_id = %goal_id, "Performance cache miss");
                None
            }
        }
    }

    /// Deletes the persisted entries for `goal_ids`. Returns how many existed.
    pub fn clear(&self, goal_ids: &[GoalId]) -> usize {
        goal_ids
            .iter()
            .filter(|id| !id.is_blank())
            .filter(|id| self.delete_key(&self.key(id)))
            .count()
    }

    /// Newest `fetchedAt` among the goals' fresh entries.
    ///
    /// Stale entries are evicted in production. Demo mode keeps them as the
    /// fetch-failure fallback.
    pub fn latest_fetched_at(&self, goal_ids: &[GoalId]) -> Option<i64> {
        goal_ids
            .iter()
            .filter_map(|id| match self.lookup(id) {
                CacheLookup::Fresh(entry) => Some(entry.fetched_at),
                CacheLookup::Stale(_) => {
                    if !self.mode.is_relaxed() {
                        self.delete_key(&self.key(id));
                    }
                    None
                }
                CacheLookup::Miss => None,
            })
            .max()
    }

    /// Whether the cooldown has passed for the newest entry of `goal_ids`.
    pub fn is_refresh_allowed(&self, goal_ids: &[GoalId]) -> bool {
        is_refresh_allowed(
            self.latest_fetched_at(goal_ids),
            self.config.refresh_min_age,
            self.clock.now_millis(),
        )
    }

    fn delete_key(&self, key: &str) -> bool {
        match self.store.delete(key) {
            Ok(existed) => existed,
            Err(e) => {
                warn!(key, error = %e, "Failed to delete performance cache entry");
                false
            }
        }
    }
}

impl std::fmt::Debug for PerformanceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerformanceCache")
            .field("backend", &self.store.backend_name())
            .field("config", &self.config)
            .field("mode", &self.mode)
            .finish()
    }
}
