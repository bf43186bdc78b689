/// Tool for one habit's detailed statistics
///
/// This module implements the habit_details tool: streaks, rolling rates,
/// the monthly breakdown and a 30-day calendar strip.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::HabitReport;
use crate::storage::SnapshotStorage;
use crate::store::CompletionStore;
use crate::tools::{not_found_message, parse_habit_id, plural_days, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DetailsParams {
    /// ID of the habit
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub success: bool,
    pub report: Option<HabitReport>,
    pub message: String,
}

pub fn get_habit_details<S: SnapshotStorage>(
    store: &CompletionStore<S>,
    params: DetailsParams,
) -> Result<DetailsResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    let report = match store.report(&habit_id) {
        Some(report) => report,
        None => {
            return Ok(DetailsResponse {
                success: false,
                report: None,
                message: not_found_message(&habit_id),
            })
        }
    };

    Ok(DetailsResponse {
        success: true,
        message: render(&report),
        report: Some(report),
    })
}

fn render(report: &HabitReport) -> String {
    let mut lines = vec![
        report.name.clone(),
        format!(
            "Current streak: {} {} | Longest: {} {}",
            report.current_streak,
            plural_days(report.current_streak),
            report.longest_streak,
            plural_days(report.longest_streak)
        ),
        format!(
            "Last 7 days: {}/7 ({:.0}%) | Last 30 days: {}/30 ({:.0}%)",
            report.completed_last_7_days,
            report.last_7_days_rate,
            report.completed_last_30_days,
            report.last_30_days_rate
        ),
        format!(
            "Overall: {}/{} ({:.0}%)",
            report.total_completed, report.total_recorded, report.overall_rate
        ),
    ];

    let strip: String = report
        .recent
        .iter()
        .map(|day| if day.completed { '#' } else { '.' })
        .collect();
    lines.push(format!("Last 30 days: {}", strip));

    if !report.monthly.is_empty() {
        lines.push("Monthly:".to_string());
        for month in &report.monthly {
            lines.push(format!(
                "  {}  {}/{} ({:.0}%)",
                month.month,
                month.completed,
                month.total,
                month.rate()
            ));
        }
    }

    lines.join("\n")
}
