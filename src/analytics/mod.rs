/// Per-habit reports and cross-habit statistics
///
/// Everything here is derived on demand from a habit collection and a
/// reference date. Nothing is cached between queries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    completed_in_window, longest_streak, monthly_breakdown, overall_rate, recent_days,
    rolling_rate, DayStatus, Habit, HabitId, MonthlyBreakdown,
};

/// Trailing windows reported for every habit
pub const WEEK_WINDOW: u32 = 7;
pub const MONTH_WINDOW: u32 = 30;

/// Summary across every habit in a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HabitStats {
    pub total_habits: u32,
    /// Habits with a `completed = true` record dated today
    pub completed_today: u32,
    /// Best cached current streak
    pub current_streak: u32,
    /// Longest run found in any habit's full history
    pub longest_streak: u32,
}

impl HabitStats {
    pub fn calculate(habits: &[Habit], today: NaiveDate) -> Self {
        Self {
            total_habits: habits.len() as u32,
            completed_today: habits.iter().filter(|h| h.is_completed_on(today)).count() as u32,
            current_streak: habits.iter().map(|h| h.streak).max().unwrap_or(0),
            longest_streak: habits
                .iter()
                .map(|h| longest_streak(&h.completions))
                .max()
                .unwrap_or(0),
        }
    }
}

/// Detailed statistics for a single habit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitReport {
    pub habit_id: HabitId,
    pub name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completed_last_7_days: u32,
    pub last_7_days_rate: f64,
    pub completed_last_30_days: u32,
    pub last_30_days_rate: f64,
    /// Completed records over all records, in percent
    pub overall_rate: f64,
    pub total_completed: u32,
    pub total_recorded: u32,
    pub monthly: Vec<MonthlyBreakdown>,
    /// Last 30 days, oldest first
    pub recent: Vec<DayStatus>,
}

impl HabitReport {
    pub fn for_habit(habit: &Habit, today: NaiveDate) -> Self {
        let completions = &habit.completions;

        Self {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            current_streak: habit.streak,
            longest_streak: longest_streak(completions),
            completed_last_7_days: completed_in_window(completions, today, WEEK_WINDOW),
            last_7_days_rate: rolling_rate(completions, today, WEEK_WINDOW),
            completed_last_30_days: completed_in_window(completions, today, MONTH_WINDOW),
            last_30_days_rate: rolling_rate(completions, today, MONTH_WINDOW),
            overall_rate: overall_rate(completions),
            total_completed: completions.iter().filter(|c| c.completed).count() as u32,
            total_recorded: completions.len() as u32,
            monthly: monthly_breakdown(completions),
            recent: recent_days(completions, today, MONTH_WINDOW),
        }
    }
}
