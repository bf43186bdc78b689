/// Tool for updating existing habits
///
/// This module implements the habit_update tool to modify a habit's name,
/// description, color or frequency. Completion history and the cached streak
/// are never changed through this tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Frequency, HabitUpdate};
use crate::storage::SnapshotStorage;
use crate::store::CompletionStore;
use crate::tools::{not_found_message, parse_habit_id, ToolError};

/// Parameters for updating an existing habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// ID of the habit to update
    pub habit_id: String,
    pub name: Option<String>,
    /// New description; an empty string clears it
    pub description: Option<String>,
    pub color: Option<String>,
    /// "daily" or "weekly"
    pub frequency: Option<String>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Update an existing habit
pub fn update_habit<S: SnapshotStorage>(
    store: &mut CompletionStore<S>,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    let frequency = match params.frequency {
        Some(ref raw) => Some(raw.parse::<Frequency>()?),
        None => None,
    };

    let update = HabitUpdate {
        name: params.name,
        description: params
            .description
            .map(|d| if d.trim().is_empty() { None } else { Some(d) }),
        color: params.color,
        frequency,
        completions: None,
    };

    if update.is_empty() {
        return Err(ToolError::InvalidParams(
            "Provide at least one of name, description, color, frequency".to_string(),
        ));
    }
    update.validate()?;

    if !store.update(&habit_id, update) {
        return Ok(UpdateHabitResponse {
            success: false,
            message: not_found_message(&habit_id),
        });
    }

    let name = store.get(&habit_id).map(|h| h.name.as_str()).unwrap_or_default();
    Ok(UpdateHabitResponse {
        success: true,
        message: format!("Updated habit '{}'", name),
    })
}
