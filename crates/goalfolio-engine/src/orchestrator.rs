//! Performance orchestration.
//!
//! Resolves goal payloads from the session map, then the cache, then the
//! upstream source through the sequential queue, and builds group
//! summaries from whatever resolved.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use goalfolio_analytics::{build_group_summary, GroupPerformanceSummary, RawPerformanceResponse};
use goalfolio_storage::{is_refresh_allowed, CacheLookup, PerformanceCache};
use goalfolio_traits::{GoalId, PerformanceSource, SourceError};

use crate::config::EngineConfig;
use crate::queue::{QueueItemResult, SequentialQueue};

/// Resolved payloads keyed by goal.
pub type PerformanceMap = HashMap<GoalId, RawPerformanceResponse>;

/// Whether a manual refresh is currently possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshStatus {
    /// Newest fresh cache timestamp among the goals (epoch millis).
    pub latest_fetched_at: Option<i64>,
    /// True once the cooldown has passed.
    pub allowed: bool,
    /// When a refresh becomes allowed (epoch millis).
    pub available_at: Option<i64>,
    /// Human-readable state.
    pub label: String,
}

/// Outcome of [`PerformanceOrchestrator::refresh`].
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Cached copies were cleared and the goals reloaded.
    Refreshed(Option<GroupPerformanceSummary>),
    /// Nothing was touched.
    Cooldown(RefreshStatus),
}

/// Drops blank ids and repeats, keeping first-seen order.
pub fn unique_goal_ids(goal_ids: &[GoalId]) -> Vec<GoalId> {
    let mut seen = HashSet::new();
    goal_ids
        .iter()
        .filter(|id| !id.is_blank())
        .filter(|id| seen.insert((*id).clone()))
        .cloned()
        .collect()
}

/// Formats a cooldown as whole hours when possible, else minutes.
fn describe_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        let hours = secs / 3600;
        format!("{hours} hour{}", if hours == 1 { "" } else { "s" })
    } else {
        let minutes = secs.div_ceil(60).max(1);
        format!("{minutes} minute{}", if minutes == 1 { "" } else { "s" })
    }
}

async fn fetch_goal(
    source: Arc<dyn PerformanceSource>,
    goal_id: GoalId,
    timeout: Duration,
) -> Result<RawPerformanceResponse, SourceError> {
    let value = match tokio::time::timeout(timeout, source.fetch_performance(&goal_id)).await {
        Ok(result) => result?,
        Err(_) => return Err(SourceError::Timeout),
    };
    RawPerformanceResponse::from_object(value)
        .ok_or_else(|| SourceError::InvalidPayload("response is not a JSON object".into()))
}

/// Computes the refresh status of `goal_ids` from the cache alone.
///
/// Reading timestamps self-cleans expired entries, like any cache read.
pub fn refresh_status_for(cache: &PerformanceCache, goal_ids: &[GoalId]) -> RefreshStatus {
    let goal_ids = unique_goal_ids(goal_ids);
    let min_age = cache.config().refresh_min_age;
    let latest = cache.latest_fetched_at(&goal_ids);
    let allowed = is_refresh_allowed(latest, min_age, cache.now_millis());
    let available_at =
        latest.map(|t| t.saturating_add(i64::try_from(min_age.as_millis()).unwrap_or(i64::MAX)));

    let label = match (latest, allowed) {
        (None, _) => "No cached performance data".to_string(),
        (Some(_), true) => "Clear cache & refresh".to_string(),
        (Some(_), false) => format!("Refresh available after {}", describe_duration(min_age)),
    };

    RefreshStatus {
        latest_fetched_at: latest,
        allowed,
        available_at,
        label,
    }
}

/// Owns the per-session payload map and the persistent cache.
///
/// Independent orchestrators never share state.
pub struct PerformanceOrchestrator {
    source: Arc<dyn PerformanceSource>,
    cache: PerformanceCache,
    queue: SequentialQueue,
    config: EngineConfig,
    session: PerformanceMap,
}

impl PerformanceOrchestrator {
    pub(crate) fn new(
        source: Arc<dyn PerformanceSource>,
        cache: PerformanceCache,
        queue: SequentialQueue,
        config: EngineConfig,
    ) -> Self {
        Self {
            source,
            cache,
            queue,
            config,
            session: HashMap::new(),
        }
    }

    /// Start building an orchestrator.
    pub fn builder() -> crate::builder::PerformanceOrchestratorBuilder {
        crate::builder::PerformanceOrchestratorBuilder::new()
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The persistent cache.
    pub fn cache(&self) -> &PerformanceCache {
        &self.cache
    }

    /// Number of goals memoized this session.
    pub fn session_len(&self) -> usize {
        self.session.len()
    }

    /// Resolves payloads for `goal_ids`.
    ///
    /// Memoized payloads are used first, then fresh cache entries; the rest
    /// are fetched one at a time. A goal whose fetch fails is left out,
    /// except in demo mode where a stale cache entry may stand in.
    pub async fn ensure_performance(&mut self, goal_ids: &[GoalId]) -> PerformanceMap {
        let mut resolved = PerformanceMap::new();
        let mut needs_fetch = Vec::new();

        for goal_id in unique_goal_ids(goal_ids) {
            if let Some(response) = self.session.get(&goal_id) {
                resolved.insert(goal_id, response.clone());
                continue;
            }
            match self.cache.lookup(&goal_id) {
                CacheLookup::Fresh(entry) => {
                    debug!(goal_id = %goal_id, "Performance cache hit");
                    self.session.insert(goal_id.clone(), entry.response.clone());
                    resolved.insert(goal_id, entry.response);
                }
                // Kept as a fallback candidate until the fetch settles.
                CacheLookup::Stale(_) if self.config.mode.is_relaxed() => needs_fetch.push(goal_id),
                CacheLookup::Stale(_) => {
                    self.cache.clear(std::slice::from_ref(&goal_id));
                    needs_fetch.push(goal_id);
                }
                CacheLookup::Miss => needs_fetch.push(goal_id),
            }
        }

        if needs_fetch.is_empty() {
            return resolved;
        }

        debug!(
            count = needs_fetch.len(),
            source = self.source.name(),
            "Fetching performance data"
        );
        let source = Arc::clone(&self.source);
        let timeout = self.config.request_timeout;
        let results = self
            .queue
            .run_sequential(needs_fetch, |goal_id| {
                fetch_goal(Arc::clone(&source), goal_id, timeout)
            })
            .await;

        for result in results {
            match result {
                QueueItemResult::Fulfilled { item, value } => {
                    let (_, stats) = value.time_series_with_stats();
                    debug!(goal_id = %item, points = stats.accepted, dropped = stats.dropped, "Fetched performance data");
                    self.cache.write(&item, &value);
                    self.session.insert(item.clone(), value.clone());
                    resolved.insert(item, value);
                }
                QueueItemResult::Rejected { item, reason } => {
                    warn!(goal_id = %item, error = %reason, "Performance fetch failed");
                    if let Some(entry) = self.stale_fallback(&item) {
                        resolved.insert(item, entry);
                    }
                }
            }
        }

        resolved
    }

    fn stale_fallback(&self, goal_id: &GoalId) -> Option<RawPerformanceResponse> {
        if !self.config.mode.is_relaxed() {
            return None;
        }
        let entry = self.cache.read(goal_id, true)?;
        debug!(goal_id = %goal_id, fetched_at = entry.fetched_at, "Using stale cache after failed fetch");
        Some(entry.response)
    }

    /// Resolves the goals and summarizes them as a group.
    ///
    /// Returns `None` when no goal resolved.
    pub async fn group_summary(&mut self, goal_ids: &[GoalId]) -> Option<GroupPerformanceSummary> {
        let performance = self.ensure_performance(goal_ids).await;
        let responses: Vec<RawPerformanceResponse> = unique_goal_ids(goal_ids)
            .iter()
            .filter_map(|id| performance.get(id).cloned())
            .collect();
        build_group_summary(&responses, self.config.chart_window)
    }

    /// Reports whether a manual refresh is allowed for the goals.
    pub fn refresh_status(&self, goal_ids: &[GoalId]) -> RefreshStatus {
        refresh_status_for(&self.cache, goal_ids)
    }

    /// Clears and reloads the goals if the cooldown has passed.
    pub async fn refresh(&mut self, goal_ids: &[GoalId]) -> RefreshOutcome {
        let status = self.refresh_status(goal_ids);
        if !status.allowed {
            debug!(label = %status.label, "Refresh not allowed");
            return RefreshOutcome::Cooldown(status);
        }

        let cleared = self.clear(goal_ids);
        info!(goals = goal_ids.len(), cleared, "Refreshing performance data");
        RefreshOutcome::Refreshed(self.group_summary(goal_ids).await)
    }

    /// Drops cached and memoized copies. Returns how many cache entries existed.
    pub fn clear(&mut self, goal_ids: &[GoalId]) -> usize {
        let goal_ids = unique_goal_ids(goal_ids);
        for goal_id in &goal_ids {
            self.session.remove(goal_id);
        }
        self.cache.clear(&goal_ids)
    }
}

impl std::fmt::Debug for PerformanceOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerformanceOrchestrator")
            .field("source", &self.source.name())
            .field("cache", &self.cache)
            .field("queue", &self.queue)
            .field("session", &self.session.len())
            .finish()
    }
}
