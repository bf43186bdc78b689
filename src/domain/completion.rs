/// Per-day completion records
///
/// A `HabitCompletion` marks whether a habit was done on one calendar day.
/// A record with `completed == false` means "explicitly not done", which is
/// different from having no record for that day at all.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Canonical wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day's completion state for a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCompletion {
    /// Calendar day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub completed: bool,
}

impl HabitCompletion {
    /// A freshly toggled record is always a completion
    pub fn done(date: NaiveDate) -> Self {
        Self { date, completed: true }
    }
}

/// Parse a `YYYY-MM-DD` string into a calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", s)))
}

/// Format a calendar date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Collapse records that share a date, keeping the last one seen
///
/// Order of first appearance is preserved so the result still reads as an
/// insertion-ordered history.
pub fn dedup_by_date(completions: Vec<HabitCompletion>) -> Vec<HabitCompletion> {
    let mut result: Vec<HabitCompletion> = Vec::with_capacity(completions.len());
    for completion in completions {
        match result.iter_mut().find(|c| c.date == completion.date) {
            Some(existing) => existing.completed = completion.completed,
            None => result.push(completion),
        }
    }
    result
}
