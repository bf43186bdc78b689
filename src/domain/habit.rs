/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit
/// along with the input shapes used to create and update one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{current_streak, dedup_by_date, DomainError, Frequency, HabitCompletion, HabitId};

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_COLOR_LEN: usize = 32;

/// Color assigned when the caller does not pick one
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// A habit represents something the user wants to do regularly
///
/// Field names serialize in camelCase so snapshots stay readable by the web
/// client that shares the same storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Presentation color, opaque to the calculations
    pub color: String,
    #[serde(default)]
    pub frequency: Frequency,
    pub created_at: DateTime<Utc>,
    /// Cached current streak. Recomputed after every completion mutation.
    #[serde(default)]
    pub streak: u32,
    /// Insertion-ordered completion records, unique by date
    #[serde(default)]
    pub completions: Vec<HabitCompletion>,
}

/// Fields a caller supplies when creating a habit
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub frequency: Frequency,
}

impl NewHabit {
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: DEFAULT_COLOR.to_string(),
            frequency,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Check the caller-facing rules before the store ever sees the input
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        validate_color(&self.color)?;
        Ok(())
    }
}

/// Partial update of a habit
///
/// `None` leaves a field untouched. `description: Some(None)` clears the
/// description. The cached streak is deliberately absent; it is only ever
/// derived from `completions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<String>,
    pub frequency: Option<Frequency>,
    pub completions: Option<Vec<HabitCompletion>>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.frequency.is_none()
            && self.completions.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(ref name) = self.name {
            validate_name(name)?;
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        if let Some(ref color) = self.color {
            validate_color(color)?;
        }
        Ok(())
    }
}

impl Habit {
    /// Build a brand-new habit from already validated input
    pub fn create(new: NewHabit) -> Self {
        Self {
            id: HabitId::new(),
            name: new.name.trim().to_string(),
            description: new
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            color: new.color,
            frequency: new.frequency,
            created_at: Utc::now(),
            streak: 0,
            completions: Vec::new(),
        }
    }

    /// The record for a given day, if one exists
    pub fn completion_on(&self, date: NaiveDate) -> Option<&HabitCompletion> {
        self.completions.iter().find(|c| c.date == date)
    }

    /// Whether the habit has a `completed = true` record for this day
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completion_on(date).map(|c| c.completed).unwrap_or(false)
    }

    /// Flip (or create) the record for `date` and refresh the cached streak
    ///
    /// Returns the new completed flag for that day. A record is never removed:
    /// toggling a completed day leaves an explicit `completed = false` entry.
    pub fn toggle_completion(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        let completed = match self.completions.iter_mut().find(|c| c.date == date) {
            Some(existing) => {
                existing.completed = !existing.completed;
                existing.completed
            }
            None => {
                self.completions.push(HabitCompletion::done(date));
                true
            }
        };

        self.recompute_streak(today);
        completed
    }

    /// Recompute the cached streak from the full completion list
    pub fn recompute_streak(&mut self, today: NaiveDate) {
        self.streak = current_streak(&self.completions, today);
    }

    /// Merge a partial update into this habit
    ///
    /// Completions are only replaced when the update carries them, in which
    /// case duplicates are collapsed and the streak is recomputed.
    pub fn apply_update(&mut self, update: HabitUpdate, today: NaiveDate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency;
        }
        if let Some(completions) = update.completions {
            self.completions = dedup_by_date(completions);
            self.recompute_streak(today);
        }
    }
}

// Validation helpers

fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidHabitName(
            "Habit name cannot be empty".to_string()
        ));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidHabitName(format!(
            "Habit name cannot be longer than {} characters",
            MAX_NAME_LEN
        )));
    }

    Ok(())
}

fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
    if let Some(desc) = description {
        if desc.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::Validation {
                message: format!(
                    "Description cannot be longer than {} characters",
                    MAX_DESCRIPTION_LEN
                ),
            });
        }
    }
    Ok(())
}

fn validate_color(color: &str) -> Result<(), DomainError> {
    let trimmed = color.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_COLOR_LEN {
        return Err(DomainError::Validation {
            message: format!("Color must be 1-{} characters", MAX_COLOR_LEN),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_date;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_create_valid_habit() {
        let new = NewHabit::new("  Morning Run ", Frequency::Daily)
            .with_description("30-minute jog")
            .with_color("#ef4444");
        assert!(new.validate().is_ok());

        let habit = Habit::create(new);
        assert_eq!(habit.name, "Morning Run");
        assert_eq!(habit.description.as_deref(), Some("30-minute jog"));
        assert_eq!(habit.streak, 0);
        assert!(habit.completions.is_empty());
    }

    #[test]
    fn test_invalid_habit_name() {
        assert!(NewHabit::new("", Frequency::Daily).validate().is_err());
        assert!(NewHabit::new("   ", Frequency::Daily).validate().is_err());
        assert!(NewHabit::new("x".repeat(101), Frequency::Daily).validate().is_err());
    }

    #[test]
    fn test_toggle_inserts_then_flips() {
        let mut habit = Habit::create(NewHabit::new("Read", Frequency::Daily));
        let today = date("2024-01-03");

        assert!(habit.toggle_completion(today, today));
        assert_eq!(habit.streak, 1);

        assert!(!habit.toggle_completion(today, today));
        assert_eq!(habit.completions.len(), 1);
        assert_eq!(habit.completion_on(today).map(|c| c.completed), Some(false));
        assert_eq!(habit.streak, 0);
    }

    #[test]
    fn test_update_leaves_completions_alone() {
        let mut habit = Habit::create(NewHabit::new("Read", Frequency::Daily));
        let today = date("2024-01-03");
        habit.toggle_completion(today, today);

        habit.apply_update(
            HabitUpdate {
                name: Some("Read more".to_string()),
                frequency: Some(Frequency::Weekly),
                ..Default::default()
            },
            today,
        );

        assert_eq!(habit.name, "Read more");
        assert_eq!(habit.frequency, Frequency::Weekly);
        assert_eq!(habit.completions.len(), 1);
        assert_eq!(habit.streak, 1);
    }

    #[test]
    fn test_update_with_completions_recomputes_streak() {
        let mut habit = Habit::create(NewHabit::new("Read", Frequency::Daily));
        let today = date("2024-01-03");

        habit.apply_update(
            HabitUpdate {
                completions: Some(vec![
                    HabitCompletion::done(date("2024-01-02")),
                    HabitCompletion::done(date("2024-01-03")),
                    HabitCompletion::done(date("2024-01-03")),
                ]),
                ..Default::default()
            },
            today,
        );

        assert_eq!(habit.completions.len(), 2);
        assert_eq!(habit.streak, 2);
    }

    #[test]
    fn test_snapshot_field_names() {
        let habit = Habit::create(NewHabit::new("Read", Frequency::Weekly));
        let value = serde_json::to_value(&habit).unwrap();

        assert!(value.get("createdAt").is_some());
        assert_eq!(value["frequency"], "weekly");
        assert!(value.get("description").is_none());
    }
}
