/// Streak and completion-rate calculations
///
/// Pure functions over a habit's completion records. Records may arrive in
/// any order, so every calculation that looks at adjacent days sorts first.
/// Only `completed = true` records count toward streaks and rates; a
/// `completed = false` record is kept for monthly totals.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{format_date, HabitCompletion};

/// Completion counts for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBreakdown {
    /// Month key in `YYYY-MM` form
    pub month: String,
    pub completed: u32,
    /// Number of records (completed or not) dated in this month
    pub total: u32,
}

impl MonthlyBreakdown {
    /// Completed records as a percentage of all records in the month
    pub fn rate(&self) -> f64 {
        percentage(self.completed, self.total)
    }
}

/// One cell of the recent-days calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub completed: bool,
}

/// Completed dates, sorted ascending
fn completed_dates(completions: &[HabitCompletion]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = completions
        .iter()
        .filter(|c| c.completed)
        .map(|c| c.date)
        .collect();
    dates.sort();
    dates
}

fn completed_set(completions: &[HabitCompletion]) -> HashSet<NaiveDate> {
    completions
        .iter()
        .filter(|c| c.completed)
        .map(|c| c.date)
        .collect()
}

fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Count of consecutive completed days ending today or yesterday
///
/// The chain is still alive if the latest completion was yesterday, so an
/// unfinished day does not reset the count. It is broken as soon as a whole
/// day passes without a completion, and the backward walk stops at the first
/// gap that is not exactly one day.
pub fn current_streak(completions: &[HabitCompletion], today: NaiveDate) -> u32 {
    let mut dates = completed_dates(completions);
    dates.reverse();

    let most_recent = match dates.first() {
        Some(date) => *date,
        None => return 0,
    };

    if (today - most_recent).num_days() > 1 {
        return 0;
    }

    let mut streak = 1;
    for pair in dates.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

/// Longest run of consecutive completed days anywhere in the history
pub fn longest_streak(completions: &[HabitCompletion]) -> u32 {
    let dates = completed_dates(completions);
    if dates.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut running = 1;

    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            running += 1;
        } else {
            longest = longest.max(running);
            running = 1;
        }
    }

    longest.max(running)
}

/// Number of completed days in the `window` days ending today (inclusive)
pub fn completed_in_window(completions: &[HabitCompletion], today: NaiveDate, window: u32) -> u32 {
    let done = completed_set(completions);
    (0..window as i64)
        .map(|offset| today - Duration::days(offset))
        .filter(|date| done.contains(date))
        .count() as u32
}

/// Percentage of the `window` days ending today that were completed
pub fn rolling_rate(completions: &[HabitCompletion], today: NaiveDate, window: u32) -> f64 {
    percentage(completed_in_window(completions, today, window), window)
}

/// Completed records as a percentage of all records
pub fn overall_rate(completions: &[HabitCompletion]) -> f64 {
    let completed = completions.iter().filter(|c| c.completed).count() as u32;
    percentage(completed, completions.len() as u32)
}

/// Per-month completion counts, most recent month first
pub fn monthly_breakdown(completions: &[HabitCompletion]) -> Vec<MonthlyBreakdown> {
    let mut months: BTreeMap<String, (u32, u32)> = BTreeMap::new();

    for completion in completions {
        let key = completion.date.format("%Y-%m").to_string();
        let counts = months.entry(key).or_insert((0, 0));
        counts.1 += 1;
        if completion.completed {
            counts.0 += 1;
        }
    }

    months
        .into_iter()
        .rev()
        .map(|(month, (completed, total))| MonthlyBreakdown { month, completed, total })
        .collect()
}

/// The last `days` calendar days, oldest first, flagged by completion
pub fn recent_days(completions: &[HabitCompletion], today: NaiveDate, days: u32) -> Vec<DayStatus> {
    let done = completed_set(completions);
    (0..days as i64)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DayStatus { date, completed: done.contains(&date) }
        })
        .collect()
}

/// Compact `YYYY-MM-DD` rendering of the latest completed day
pub fn last_completed(completions: &[HabitCompletion]) -> Option<String> {
    completed_dates(completions).last().map(|d| format_date(*d))
}
