/// Tools exposed to JSON-RPC clients
///
/// Each tool validates its parameters, runs one command or query against the
/// completion store and returns a serializable response with a human-readable
/// message. Invalid arguments are rejected here so the store only ever sees
/// trusted input.

pub mod create;
pub mod delete;
pub mod details;
pub mod list;
pub mod session;
pub mod stats;
pub mod toggle;
pub mod update;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use details::*;
pub use list::*;
pub use session::*;
pub use stats::*;
pub use toggle::*;
pub use update::*;

use thiserror::Error;

use crate::domain::{DomainError, HabitId};

/// Errors a tool reports back to the caller
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Parse a habit id argument
fn parse_habit_id(raw: &str) -> Result<HabitId, ToolError> {
    if raw.trim().is_empty() {
        return Err(ToolError::InvalidParams("habit_id cannot be empty".to_string()));
    }
    HabitId::from_string(raw)
        .map_err(|_| ToolError::InvalidParams(format!("'{}' is not a valid habit id", raw)))
}

/// Message for commands that target an id that does not exist
fn not_found_message(id: &HabitId) -> String {
    format!("No habit with id {}. Nothing changed.", id)
}

fn plural_days(n: u32) -> &'static str {
    if n == 1 { "day" } else { "days" }
}
