/// Storage layer for persisting habit snapshots
///
/// Persistence is a plain key-value medium. Each storage key holds one JSON
/// snapshot of a user's full habit collection. The `snapshot` module turns
/// those raw values into habits and back.

pub mod memory;
pub mod migrations;
pub mod snapshot;
pub mod sqlite;

// Re-export the main storage types
pub use memory::MemoryStorage;
pub use snapshot::{load_habits, save_habits, StorageKey};
pub use sqlite::SqliteStorage;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Key-value medium that snapshots are written to
///
/// Implementations replace the whole value on `put`; there is no partial
/// update. Keeping the medium behind this trait lets the store run against
/// SQLite in the binary and against memory in tests.
pub trait SnapshotStorage {
    /// Raw stored value for a key, or `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under a key
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: SnapshotStorage + ?Sized> SnapshotStorage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}
