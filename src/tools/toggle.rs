/// Tool for toggling a habit's completion on a day
///
/// This module implements the habit_toggle tool. The first toggle for a day
/// marks it done; each later toggle flips it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::parse_date;
use crate::storage::SnapshotStorage;
use crate::store::{CompletionStore, ToggleOutcome};
use crate::tools::{not_found_message, parse_habit_id, plural_days, ToolError};

/// Parameters for toggling a completion
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleParams {
    /// ID of the habit
    pub habit_id: String,
    /// Day to toggle as YYYY-MM-DD (defaults to today)
    pub date: Option<String>,
}

/// Response from toggling a completion
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub outcome: Option<ToggleOutcome>,
    pub message: String,
}

pub fn toggle_habit<S: SnapshotStorage>(
    store: &mut CompletionStore<S>,
    params: ToggleParams,
) -> Result<ToggleResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let date = match params.date {
        Some(ref raw) => parse_date(raw)?,
        None => store.today(),
    };

    let outcome = match store.toggle_completion(&habit_id, date) {
        Some(outcome) => outcome,
        None => {
            return Ok(ToggleResponse {
                success: false,
                outcome: None,
                message: not_found_message(&habit_id),
            })
        }
    };

    let message = if outcome.completed {
        format!(
            "Marked {} as done. Current streak: {} {}",
            date,
            outcome.streak,
            plural_days(outcome.streak)
        )
    } else {
        format!(
            "Marked {} as not done. Current streak: {} {}",
            date,
            outcome.streak,
            plural_days(outcome.streak)
        )
    };

    Ok(ToggleResponse {
        success: true,
        outcome: Some(outcome),
        message,
    })
}
