/// Tool for listing all habits
///
/// This module implements the habit_list tool: one row per habit with
/// today's state, the cached streak and the last-7-days count.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::WEEK_WINDOW;
use crate::domain::completed_in_window;
use crate::storage::SnapshotStorage;
use crate::store::CompletionStore;
use crate::tools::{plural_days, ToolError};

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Sort by "created" (default), "name" or "streak"
    pub sort_by: Option<String>,
}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub short_id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub frequency: String,
    pub current_streak: u32,
    pub completed_today: bool,
    pub completed_last_7_days: u32,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub message: String,
}

pub fn list_habits<S: SnapshotStorage>(
    store: &CompletionStore<S>,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, ToolError> {
    let today = store.today();

    let mut habits: Vec<HabitSummary> = store
        .habits()
        .iter()
        .map(|habit| HabitSummary {
            habit_id: habit.id.to_string(),
            short_id: habit.id.short(),
            name: habit.name.clone(),
            description: habit.description.clone(),
            color: habit.color.clone(),
            frequency: habit.frequency.to_string(),
            current_streak: habit.streak,
            completed_today: habit.is_completed_on(today),
            completed_last_7_days: completed_in_window(&habit.completions, today, WEEK_WINDOW),
        })
        .collect();

    match params.sort_by.as_deref().map(str::trim) {
        None | Some("") | Some("created") => {}
        Some("name") => habits.sort_by_key(|h| h.name.to_lowercase()),
        Some("streak") => habits.sort_by(|a, b| b.current_streak.cmp(&a.current_streak)),
        Some(other) => {
            return Err(ToolError::InvalidParams(format!(
                "Unknown sort '{}'. Valid options: created, name, streak",
                other
            )))
        }
    }

    let message = if habits.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        habits
            .iter()
            .map(|h| {
                format!(
                    "[{}] {} ({})\n   Frequency: {} | Streak: {} {} | Last 7 days: {}/{}",
                    if h.completed_today { "x" } else { " " },
                    h.name,
                    h.short_id,
                    h.frequency,
                    h.current_streak,
                    plural_days(h.current_streak),
                    h.completed_last_7_days,
                    WEEK_WINDOW
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Ok(ListHabitsResponse { habits, message })
}
