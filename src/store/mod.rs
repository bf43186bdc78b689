/// The completion store
///
/// `CompletionStore` owns the authoritative in-memory habit collection for
/// the active identity. Every command that changes the collection writes a
/// full snapshot back to storage. A failed write is logged and otherwise
/// ignored; the in-memory state stays authoritative for the session.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{HabitReport, HabitStats};
use crate::domain::{Clock, Habit, HabitId, HabitUpdate, NewHabit, SystemClock};
use crate::storage::{load_habits, save_habits, SnapshotStorage, StorageKey};

/// Result of toggling one day for one habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub habit_id: HabitId,
    pub date: NaiveDate,
    /// The day's completed flag after the toggle
    pub completed: bool,
    /// The habit's recomputed current streak
    pub streak: u32,
}

pub struct CompletionStore<S: SnapshotStorage> {
    storage: S,
    key: StorageKey,
    habits: Vec<Habit>,
    clock: Box<dyn Clock>,
}

impl<S: SnapshotStorage> CompletionStore<S> {
    /// Open the store for an identity using the local system date
    pub fn open(storage: S, identity: Option<&str>) -> Self {
        Self::with_clock(storage, identity, SystemClock)
    }

    /// Open the store with an explicit source for "today"
    pub fn with_clock(storage: S, identity: Option<&str>, clock: impl Clock + 'static) -> Self {
        let key = StorageKey::for_identity(identity);
        let habits = load_habits(&storage, &key);

        tracing::info!("Opened habit store '{}' with {} habits", key, habits.len());

        Self {
            storage,
            key,
            habits,
            clock: Box::new(clock),
        }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Drop the current collection and load the one for another identity
    ///
    /// Nothing from the previous identity is written to or merged into the
    /// new key.
    pub fn switch_identity(&mut self, identity: Option<&str>) {
        let key = StorageKey::for_identity(identity);
        self.habits = load_habits(&self.storage, &key);

        tracing::info!(
            "Switched habit store from '{}' to '{}' ({} habits)",
            self.key,
            key,
            self.habits.len()
        );
        self.key = key;
    }

    /// Append a new habit built from caller-validated input
    pub fn create(&mut self, new: NewHabit) -> Habit {
        let habit = Habit::create(new);
        tracing::debug!("Created habit '{}' ({})", habit.name, habit.id);

        self.habits.push(habit.clone());
        self.persist();
        habit
    }

    /// Remove a habit and all of its completions
    ///
    /// Returns `false` without touching anything when the id is unknown.
    pub fn delete(&mut self, id: &HabitId) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| &h.id != id);

        if self.habits.len() == before {
            tracing::debug!("Delete ignored, no habit {}", id);
            return false;
        }

        tracing::debug!("Deleted habit {}", id);
        self.persist();
        true
    }

    /// Toggle one day's completion and recompute that habit's streak
    pub fn toggle_completion(&mut self, id: &HabitId, date: NaiveDate) -> Option<ToggleOutcome> {
        let today = self.clock.today();
        let habit = match self.habits.iter_mut().find(|h| &h.id == id) {
            Some(habit) => habit,
            None => {
                tracing::debug!("Toggle ignored, no habit {}", id);
                return None;
            }
        };

        let completed = habit.toggle_completion(date, today);
        let outcome = ToggleOutcome {
            habit_id: habit.id.clone(),
            date,
            completed,
            streak: habit.streak,
        };

        tracing::debug!(
            "Toggled {} on {} -> completed={} streak={}",
            id,
            date,
            completed,
            outcome.streak
        );
        self.persist();
        Some(outcome)
    }

    /// Merge a partial update into one habit
    pub fn update(&mut self, id: &HabitId, update: HabitUpdate) -> bool {
        let today = self.clock.today();
        let habit = match self.habits.iter_mut().find(|h| &h.id == id) {
            Some(habit) => habit,
            None => {
                tracing::debug!("Update ignored, no habit {}", id);
                return false;
            }
        };

        habit.apply_update(update, today);
        tracing::debug!("Updated habit '{}' ({})", habit.name, id);
        self.persist();
        true
    }

    /// Cross-habit statistics as of today
    pub fn stats(&self) -> HabitStats {
        HabitStats::calculate(&self.habits, self.clock.today())
    }

    /// Detailed statistics for one habit as of today
    pub fn report(&self, id: &HabitId) -> Option<HabitReport> {
        self.get(id)
            .map(|habit| HabitReport::for_habit(habit, self.clock.today()))
    }

    fn persist(&self) {
        if let Err(e) = save_habits(&self.storage, &self.key, &self.habits) {
            tracing::warn!(
                "Failed to save snapshot '{}', changes will not survive a restart: {}",
                self.key,
                e
            );
        }
    }
}
