/// Tool for deleting habits
///
/// This module implements the habit_delete tool. Deletion removes the habit
/// and its whole completion history.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::SnapshotStorage;
use crate::store::CompletionStore;
use crate::tools::{not_found_message, parse_habit_id, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// ID of the habit to delete
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
    pub message: String,
}

pub fn delete_habit<S: SnapshotStorage>(
    store: &mut CompletionStore<S>,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let name = store.get(&habit_id).map(|h| h.name.clone());

    if !store.delete(&habit_id) {
        return Ok(DeleteHabitResponse {
            success: false,
            message: not_found_message(&habit_id),
        });
    }

    Ok(DeleteHabitResponse {
        success: true,
        message: format!("Deleted habit '{}' and its history", name.unwrap_or_default()),
    })
}
