/// Tool for creating new habits
///
/// This module implements the habit_create tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Frequency, Habit, NewHabit, DEFAULT_COLOR};
use crate::storage::SnapshotStorage;
use crate::store::CompletionStore;
use crate::tools::ToolError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Display color, e.g. "#22c55e"
    pub color: Option<String>,
    /// "daily" or "weekly" (defaults to daily)
    pub frequency: Option<String>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit: Habit,
    pub message: String,
}

/// Validate the parameters and append a new habit
pub fn create_habit<S: SnapshotStorage>(
    store: &mut CompletionStore<S>,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let frequency = match params.frequency {
        Some(ref raw) => raw.parse::<Frequency>()?,
        None => Frequency::Daily,
    };

    let new = NewHabit {
        name: params.name,
        description: params.description,
        color: params.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        frequency,
    };
    new.validate()?;

    let habit = store.create(new);

    Ok(CreateHabitResponse {
        success: true,
        message: format!("Created habit '{}' ({}). Ready to start your streak!", habit.name, habit.id),
        habit,
    })
}
