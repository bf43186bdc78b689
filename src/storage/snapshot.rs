/// Snapshot encoding and storage-key derivation
///
/// A snapshot is the JSON array of every habit belonging to one identity.
/// Loading never fails: a missing, unreadable or corrupt snapshot degrades to
/// an empty collection with a warning in the log.

use std::fmt;

use crate::domain::{dedup_by_date, Habit};
use crate::storage::{SnapshotStorage, StorageError};

/// Key used when no identity is signed in
pub const GUEST_KEY: &str = "habit-tracker-data";

/// Address of one identity's snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derive the key for an identity, falling back to the guest key
    ///
    /// Blank identities count as signed out.
    pub fn for_identity(identity: Option<&str>) -> Self {
        match identity.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self(format!("{}-{}", GUEST_KEY, id)),
            None => Self::guest(),
        }
    }

    pub fn guest() -> Self {
        Self(GUEST_KEY.to_string())
    }

    pub fn is_guest(&self) -> bool {
        self.0 == GUEST_KEY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the habit collection stored under `key`
pub fn load_habits<S: SnapshotStorage + ?Sized>(storage: &S, key: &StorageKey) -> Vec<Habit> {
    let raw = match storage.get(key.as_str()) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No snapshot under '{}', starting empty", key);
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Failed to read snapshot '{}': {}", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Habit>>(&raw) {
        Ok(mut habits) => {
            for habit in habits.iter_mut() {
                habit.completions = dedup_by_date(std::mem::take(&mut habit.completions));
            }
            tracing::debug!("Loaded {} habits from '{}'", habits.len(), key);
            habits
        }
        Err(e) => {
            tracing::warn!("Discarding corrupt snapshot '{}': {}", key, e);
            Vec::new()
        }
    }
}

/// Replace the snapshot under `key` with the full collection
pub fn save_habits<S: SnapshotStorage + ?Sized>(
    storage: &S,
    key: &StorageKey,
    habits: &[Habit],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(habits)?;
    storage.put(key.as_str(), &raw)
}
