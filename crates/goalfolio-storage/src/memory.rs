//! In-memory key-value store.
//!
//! Useful for testing and short-lived sessions. Data is not persisted across
//! restarts.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::adapter::KeyValueStore;
use crate::error::{StorageError, StorageResult};

/// In-memory store guarded by an `RwLock`.
///
/// # Example
///
/// ```rust
/// use goalfolio_storage::{InMemoryStore, KeyValueStore};
///
/// let store = InMemoryStore::new();
/// assert!(store.is_healthy());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Lock(e.to_string())
}

impl KeyValueStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn is_healthy(&self) -> bool {
        !self.entries.is_poisoned()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().map_err(lock_error)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .write()
            .map_err(lock_error)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        Ok(self
            .entries
            .write()
            .map_err(lock_error)?
            .remove(key)
            .is_some())
    }

    fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .map_err(lock_error)?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name() {
        assert_eq!(InMemoryStore::new().backend_name(), "memory");
    }

    #[test]
    fn test_crud() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_keys_with_prefix() {
        let store = InMemoryStore::new();
        store.set("p_b", "").unwrap();
        store.set("p_a", "").unwrap();
        store.set("other", "").unwrap();
        assert_eq!(store.keys_with_prefix("p_").unwrap(), vec!["p_a", "p_b"]);
    }
}
