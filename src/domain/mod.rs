/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, HabitCompletion), the
/// streak and rate calculations over them, and the clock that supplies the
/// reference date for those calculations.

pub mod clock;
pub mod completion;
pub mod habit;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use clock::*;
pub use completion::*;
pub use habit::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
