/// Tool for changing the active identity
///
/// This module implements the session_switch tool. Switching reloads the
/// habit collection from the new identity's storage key; nothing from the
/// previous identity carries over.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::SnapshotStorage;
use crate::store::CompletionStore;
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SwitchSessionParams {
    /// Identity to switch to (e.g. an email). Omit to continue as guest.
    pub identity: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SwitchSessionResponse {
    pub success: bool,
    pub storage_key: String,
    pub habit_count: usize,
    pub message: String,
}

pub fn switch_session<S: SnapshotStorage>(
    store: &mut CompletionStore<S>,
    params: SwitchSessionParams,
) -> Result<SwitchSessionResponse, ToolError> {
    store.switch_identity(params.identity.as_deref());

    let who = if store.key().is_guest() {
        "guest".to_string()
    } else {
        params.identity.unwrap_or_default().trim().to_string()
    };
    let habit_count = store.habits().len();

    Ok(SwitchSessionResponse {
        success: true,
        storage_key: store.key().to_string(),
        habit_count,
        message: format!("Signed in as {} with {} habits", who, habit_count),
    })
}
