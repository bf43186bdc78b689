/// Tool for cross-habit statistics
///
/// This module implements the habit_stats tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::HabitStats;
use crate::storage::SnapshotStorage;
use crate::store::CompletionStore;
use crate::tools::{plural_days, ToolError};

/// The stats tool takes no arguments
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatsParams {}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: HabitStats,
    pub message: String,
}

pub fn get_stats<S: SnapshotStorage>(
    store: &CompletionStore<S>,
    _params: StatsParams,
) -> Result<StatsResponse, ToolError> {
    let stats = store.stats();

    let message = format!(
        "Total habits: {}\nCompleted today: {}/{}\nCurrent streak: {} {}\nLongest streak: {} {}",
        stats.total_habits,
        stats.completed_today,
        stats.total_habits,
        stats.current_streak,
        plural_days(stats.current_streak),
        stats.longest_streak,
        plural_days(stats.longest_streak),
    );

    Ok(StatsResponse { stats, message })
}
