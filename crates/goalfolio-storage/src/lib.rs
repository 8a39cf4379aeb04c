//! Goalfolio Storage Layer
//!
//! This crate provides the key-value stores and the performance snapshot
//! cache used by the Goalfolio engine.
//!
//! # Features
//!
//! - **Performance Cache**: Per-goal snapshots with freshness and cooldown rules
//! - **Self-cleaning Reads**: Stale and malformed entries are deleted on access
//! - **Multiple Backends**: redb (persistent) and in-memory stores
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use goalfolio_storage::{CacheConfig, InMemoryStore, PerformanceCache};
//! use goalfolio_traits::{ExecutionMode, GoalId, SystemClock};
//! use goalfolio_analytics::RawPerformanceResponse;
//!
//! let cache = PerformanceCache::new(
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(SystemClock),
//!     CacheConfig::default(),
//!     ExecutionMode::Production,
//! );
//!
//! let goal = GoalId::new("goal-1");
//! cache.write(&goal, &RawPerformanceResponse::new(serde_json::json!({})));
//! assert!(cache.read(&goal, false).is_some());
//! ```
//!
//! # Storage Backends
//!
//! ## RedbStore (Default)
//!
//! Uses [redb](https://crates.io/crates/redb), a pure-Rust embedded database
//! with ACID transactions. Suitable for single-process applications.
//!
//! ## InMemoryStore
//!
//! A simple in-memory implementation for testing and single sessions.
//! Data is not persisted across restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod adapter;
mod cache;
mod error;
mod memory;
mod redb;

pub use adapter::KeyValueStore;
pub use cache::{
    is_cache_fresh, is_refresh_allowed, CacheConfig, CacheEntry, CacheLookup, PerformanceCache,
    DEFAULT_KEY_PREFIX, DEFAULT_MAX_AGE, DEFAULT_REFRESH_MIN_AGE,
};
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use crate::redb::RedbStore;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adapter::KeyValueStore;
    pub use crate::cache::{CacheConfig, CacheEntry, CacheLookup, PerformanceCache};
    pub use crate::error::{StorageError, StorageResult};
    pub use crate::memory::InMemoryStore;
    pub use crate::redb::RedbStore;
}
