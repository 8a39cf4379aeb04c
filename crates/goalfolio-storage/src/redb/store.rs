//! RedbStore implementation.
//!
//! Implements the KeyValueStore trait using redb as the underlying database.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};

use crate::adapter::KeyValueStore;
use crate::error::StorageResult;

// Table definitions
const ENTRIES_TABLE: TableDefinition<&str, &str> = TableDefinition::new("entries");

/// Redb-based key-value store.
///
/// Uses redb, a pure-Rust embedded database, for persistent storage. Every
/// write is its own ACID transaction. Suitable for a single process.
///
/// # Example
///
/// ```rust,no_run
/// use goalfolio_storage::{KeyValueStore, RedbStore};
///
/// let store = RedbStore::open("./goalfolio-cache.redb")?;
/// assert!(store.is_healthy());
/// # Ok::<(), goalfolio_storage::StorageError>(())
/// ```
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Opens or creates a database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.initialize_tables()?;
        Ok(store)
    }

    /// Creates the entries table if it does not exist.
    fn initialize_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(ENTRIES_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl KeyValueStore for RedbStore {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    fn is_healthy(&self) -> bool {
        self.db.begin_read().is_ok()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENTRIES_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ENTRIES_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(ENTRIES_TABLE)?;
            let result = table.remove(key)?;
            result.is_some()
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENTRIES_TABLE)?;

        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            if key.value().starts_with(prefix) {
                keys.push(key.value().to_string());
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn create_test_store() -> (TempDir, RedbStore) {
        let dir = tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("test.redb")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_backend_name() {
        let (_dir, store) = create_test_store();
        assert_eq!(store.backend_name(), "redb");
        assert!(store.is_healthy());
    }

    #[test]
    fn test_crud() {
        let (_dir, store) = create_test_store();

        store.set("gpv_performance_g1", r#"{"fetchedAt":1}"#).unwrap();
        assert_eq!(
            store.get("gpv_performance_g1").unwrap().as_deref(),
            Some(r#"{"fetchedAt":1}"#)
        );

        assert!(store.delete("gpv_performance_g1").unwrap());
        assert!(!store.delete("gpv_performance_g1").unwrap());
        assert!(store.get("gpv_performance_g1").unwrap().is_none());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("persist.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("k", "v").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_keys_with_prefix() {
        let (_dir, store) = create_test_store();
        store.set("gpv_performance_b", "{}").unwrap();
        store.set("gpv_performance_a", "{}").unwrap();
        store.set("unrelated", "{}").unwrap();
        assert_eq!(
            store.keys_with_prefix("gpv_performance_").unwrap(),
            vec!["gpv_performance_a", "gpv_performance_b"]
        );
    }
}
