//! # Goalfolio Engine
//!
//! Performance orchestration for groups of investment goals.
//!
//! This crate provides:
//! - [`SequentialQueue`]: One-at-a-time fetching with a pause between items
//! - [`PerformanceOrchestrator`]: Session map, cache and fetch coordination
//! - [`EngineConfig`]: TOML-loadable settings
//!
//! ## Architecture
//!
//! ```text
//! goal ids ─> session map ─┬─> hit
//!                          │
//!                          └─> PerformanceCache ─┬─> fresh hit
//!                                                │
//!                                                └─> SequentialQueue ─> PerformanceSource
//!                                                         │
//!                                                         └─> cache write + memoize
//!
//! resolved payloads ─> build_group_summary ─> GroupPerformanceSummary
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut orchestrator = PerformanceOrchestrator::builder()
//!     .with_source(Arc::new(source))
//!     .with_store(Arc::new(RedbStore::open("cache.redb")?))
//!     .with_config(EngineConfig::from_toml_file("goalfolio.toml")?)
//!     .build()?;
//!
//! let summary = orchestrator.group_summary(&goal_ids).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod queue;

// Re-exports
pub use builder::PerformanceOrchestratorBuilder;
pub use config::{EngineConfig, DEFAULT_REQUEST_DELAY, DEFAULT_REQUEST_TIMEOUT};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{
    refresh_status_for, unique_goal_ids, PerformanceMap, PerformanceOrchestrator, RefreshOutcome, RefreshStatus,
};
pub use queue::{QueueItemResult, QueueItemStatus, SequentialQueue, WaitFn, WaitFuture};
