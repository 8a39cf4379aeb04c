//! Builder pattern for the performance orchestrator.

use std::sync::Arc;

use goalfolio_storage::{InMemoryStore, KeyValueStore, PerformanceCache};
use goalfolio_traits::{Clock, PerformanceSource, SystemClock};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::orchestrator::PerformanceOrchestrator;
use crate::queue::{SequentialQueue, WaitFn};

/// Builder for constructing a [`PerformanceOrchestrator`].
///
/// A source is required. The store defaults to an [`InMemoryStore`] and the
/// clock to the system clock.
pub struct PerformanceOrchestratorBuilder {
    config: Option<EngineConfig>,
    source: Option<Arc<dyn PerformanceSource>>,
    store: Option<Arc<dyn KeyValueStore>>,
    clock: Option<Arc<dyn Clock>>,
    wait: Option<WaitFn>,
}

impl PerformanceOrchestratorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            source: None,
            store: None,
            clock: None,
            wait: None,
        }
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the performance source.
    pub fn with_source(mut self, source: Arc<dyn PerformanceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the cache store.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the delay between fetches.
    pub fn with_wait(mut self, wait: WaitFn) -> Self {
        self.wait = Some(wait);
        self
    }

    /// Build the orchestrator.
    pub fn build(self) -> Result<PerformanceOrchestrator, EngineError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let source = self
            .source
            .ok_or_else(|| EngineError::config("source not configured"))?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryStore::new()) as Arc<dyn KeyValueStore>);
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        let cache = PerformanceCache::new(store, clock, config.cache.clone(), config.mode);
        let mut queue = SequentialQueue::new(config.request_delay);
        if let Some(wait) = self.wait {
            queue = queue.with_wait(wait);
        }

        Ok(PerformanceOrchestrator::new(source, cache, queue, config))
    }
}

impl Default for PerformanceOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
