//! Key-value store trait definition.
//!
//! The performance cache persists JSON strings under string keys. Every
//! backend (redb, in-memory) implements [`KeyValueStore`].

use std::sync::Arc;

use crate::error::StorageResult;

/// Minimal string key-value store.
///
/// Methods are synchronous; embedded backends complete without blocking on
/// the network.
///
/// # Example
///
/// ```rust
/// use goalfolio_storage::{InMemoryStore, KeyValueStore};
///
/// let store = InMemoryStore::new();
/// store.set("gpv_performance_g1", "{}").unwrap();
/// assert_eq!(store.get("gpv_performance_g1").unwrap().as_deref(), Some("{}"));
/// assert!(store.delete("gpv_performance_g1").unwrap());
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Checks if the store is accessible.
    fn is_healthy(&self) -> bool;

    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Returns whether a value was present.
    fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Lists keys starting with `prefix`, in ascending order.
    fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn is_healthy(&self) -> bool {
        (**self).is_healthy()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        (**self).delete(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }
}
