/// Public library interface for the habit tracker
///
/// This module exports the completion store, the streak and statistics
/// engine, and the JSON-RPC server that exposes them over stdio.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

pub mod analytics;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod store;
pub mod tools;

// Re-export public modules and types
pub use analytics::{HabitReport, HabitStats};
pub use domain::*;
pub use mcp::McpServer;
pub use storage::{MemoryStorage, SnapshotStorage, SqliteStorage, StorageError, StorageKey};
pub use store::{CompletionStore, ToggleOutcome};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit tracker backed by a SQLite snapshot file
///
/// Opening the database is the only step that can fail. Everything after
/// that (loading a missing or corrupt snapshot, failed saves) degrades to
/// logged warnings.
pub struct HabitTrackerServer {
    store: CompletionStore<SqliteStorage>,
}

impl HabitTrackerServer {
    /// Open the database and load the snapshot for `identity`
    ///
    /// `today` pins the reference date instead of reading the system clock.
    pub async fn new(
        db_path: PathBuf,
        identity: Option<String>,
        today: Option<NaiveDate>,
    ) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Tracker with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        let identity = identity.as_deref();

        let store = match today {
            Some(date) => CompletionStore::with_clock(storage, identity, FixedClock(date)),
            None => CompletionStore::open(storage, identity),
        };

        Ok(Self { store })
    }

    /// Serve JSON-RPC requests over stdin/stdout until input closes
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Server started, found {} existing habits under '{}'",
            self.store.habits().len(),
            self.store.key()
        );

        let mut mcp_server = McpServer::new(self.store);
        mcp_server.run().await
    }

    pub fn store(&self) -> &CompletionStore<SqliteStorage> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CompletionStore<SqliteStorage> {
        &mut self.store
    }
}
