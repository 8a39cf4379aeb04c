//! Storage error types.
//!
//! Only store backends raise these. The performance cache absorbs them and
//! degrades to a miss or a skipped write.

use thiserror::Error;

/// Storage operation result type.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure inside a [`KeyValueStore`](crate::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// redb could not open the file or read or write a table.
    #[error("Database error: {0}")]
    Database(String),

    /// redb could not begin or commit a transaction.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// In-memory map poisoned by a panicking writer.
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redb_storage_error_maps_to_database() {
        let err: StorageError = redb::StorageError::Corrupted("bad page".into()).into();
        assert!(matches!(err, StorageError::Database(_)));
        assert!(err.to_string().contains("bad page"));
    }

    #[test]
    fn test_display() {
        let err = StorageError::Lock("poisoned".into());
        assert_eq!(err.to_string(), "Lock error: poisoned");
    }
}
