/// Basic unit tests for the streak engine and statistics
use chrono::NaiveDate;
use habit_tracker::*;

fn date(s: &str) -> NaiveDate {
    parse_date(s).expect("valid test date")
}

fn record(s: &str, completed: bool) -> HabitCompletion {
    HabitCompletion {
        date: date(s),
        completed,
    }
}

fn habit_with(name: &str, completions: Vec<HabitCompletion>, today: NaiveDate) -> Habit {
    let mut habit = Habit::create(NewHabit::new(name, Frequency::Daily));
    habit.completions = completions;
    habit.recompute_streak(today);
    habit
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation_defaults() {
        let habit = Habit::create(NewHabit::new("  Meditate ", Frequency::Daily));

        assert_eq!(habit.name, "Meditate");
        assert_eq!(habit.color, DEFAULT_COLOR);
        assert_eq!(habit.streak, 0);
        assert!(habit.completions.is_empty());
        assert!(habit.description.is_none());
    }

    #[test]
    fn test_new_habit_validation() {
        assert!(NewHabit::new("", Frequency::Daily).validate().is_err());
        assert!(NewHabit::new("x".repeat(101), Frequency::Daily).validate().is_err());
        assert!(NewHabit::new("Walk", Frequency::Weekly).validate().is_ok());
    }

    #[test]
    fn test_three_day_run_ending_today() {
        let today = date("2024-01-03");
        let completions = vec![
            record("2024-01-01", true),
            record("2024-01-02", true),
            record("2024-01-03", true),
        ];

        assert_eq!(current_streak(&completions, today), 3);
        assert_eq!(longest_streak(&completions), 3);
    }

    #[test]
    fn test_run_ending_yesterday_is_still_current() {
        let completions = vec![record("2024-01-01", true), record("2024-01-02", true)];
        assert_eq!(current_streak(&completions, date("2024-01-03")), 2);
    }

    #[test]
    fn test_stale_run_is_zero() {
        let completions = vec![record("2024-01-01", true), record("2024-01-02", true)];
        assert_eq!(current_streak(&completions, date("2024-01-05")), 0);
        assert_eq!(longest_streak(&completions), 2);
    }

    #[test]
    fn test_gap_resets_current_but_not_longest() {
        let completions = vec![
            record("2024-01-01", true),
            record("2024-01-02", true),
            record("2024-01-03", true),
            record("2024-01-04", true),
            record("2024-01-06", true),
            record("2024-01-07", true),
        ];

        assert_eq!(current_streak(&completions, date("2024-01-07")), 2);
        assert_eq!(longest_streak(&completions), 4);
    }

    #[test]
    fn test_rolling_windows() {
        let today = date("2024-01-10");
        let completions = vec![
            record("2024-01-10", true),
            record("2024-01-09", true),
            record("2024-01-04", true),
            record("2024-01-03", true),
            record("2024-01-08", false),
        ];

        assert_eq!(completed_in_window(&completions, today, 7), 3);
        let rate = rolling_rate(&completions, today, 7);
        assert!((rate - 300.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_breakdown_most_recent_first() {
        let completions = vec![
            record("2024-01-30", true),
            record("2024-01-31", false),
            record("2024-02-01", true),
        ];

        let months = monthly_breakdown(&completions);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2024-02");
        assert_eq!((months[1].completed, months[1].total), (1, 2));
        assert!((months[1].rate() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let today = date("2024-01-03");
        let mut habit = habit_with("Read", vec![record("2024-01-02", true)], today);
        assert_eq!(habit.streak, 1);

        assert!(habit.toggle_completion(today, today));
        assert_eq!(habit.streak, 2);

        assert!(!habit.toggle_completion(today, today));
        assert_eq!(habit.streak, 1);
        assert!(!habit.is_completed_on(today));
    }

    #[test]
    fn test_aggregate_stats() {
        let today = date("2024-01-10");
        let habits = vec![
            habit_with(
                "A",
                vec![
                    record("2024-01-01", true),
                    record("2024-01-02", true),
                    record("2024-01-03", true),
                    record("2024-01-04", true),
                    record("2024-01-05", true),
                    record("2024-01-06", true),
                    record("2024-01-07", true),
                    record("2024-01-08", true),
                    record("2024-01-09", true),
                ],
                today,
            ),
            habit_with("B", vec![record("2024-01-10", true)], today),
            habit_with("C", vec![record("2024-01-10", false)], today),
        ];

        let stats = HabitStats::calculate(&habits, today);
        assert_eq!(stats.total_habits, 3);
        assert_eq!(stats.completed_today, 1);
        assert_eq!(stats.current_streak, 9);
        assert_eq!(stats.longest_streak, 9);
    }

    #[test]
    fn test_empty_collection_stats() {
        let stats = HabitStats::calculate(&[], date("2024-01-01"));
        assert_eq!(stats, HabitStats::default());
    }

    #[test]
    fn test_storage_key_per_identity() {
        assert_eq!(StorageKey::for_identity(None).as_str(), "habit-tracker-data");
        assert_eq!(
            StorageKey::for_identity(Some("ada@example.com")).as_str(),
            "habit-tracker-data-ada@example.com"
        );
    }
}
