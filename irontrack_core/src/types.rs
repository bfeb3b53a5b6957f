//! Core domain types for the IronTrack workout log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout sets (one row in the stored table)
//! - Grouping periods for the consistency report
//! - Metrics used to rank categories and exercises

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row in the workout table.
///
/// A row either records a performed set (`reps >= 1`) or registers a
/// category/exercise pair as selectable before it has any real history
/// (`reps == 0`, `weight == 0.0` -- a placeholder). Placeholder rows are
/// excluded from every aggregate computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Calendar date of the set, persisted as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub category: String,
    pub exercise: String,
    /// Weight in kilograms. `0` means bodyweight / not applicable.
    pub weight: f64,
    /// Repetitions performed. `0` marks a placeholder row.
    pub reps: u32,
}

impl WorkoutSet {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        exercise: impl Into<String>,
        weight: f64,
        reps: u32,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            exercise: exercise.into(),
            weight,
            reps,
        }
    }

    /// A zero-reps, zero-weight row whose sole purpose is to make a
    /// category/exercise pair selectable.
    pub fn placeholder(
        date: NaiveDate,
        category: impl Into<String>,
        exercise: impl Into<String>,
    ) -> Self {
        Self::new(date, category, exercise, 0.0, 0)
    }

    /// Whether this row records an actual performed set.
    pub fn is_logged(&self) -> bool {
        self.reps > 0
    }

    /// Training-load proxy: weight multiplied by reps.
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// Calendar period the consistency report groups workout days into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    /// ISO calendar week.
    Week,
    /// Calendar month.
    Month,
}

/// Metric used to rank categories and exercises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageMetric {
    /// Number of logged sets.
    Sets,
    /// Summed volume (weight x reps).
    Volume,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_volume() {
        let set = WorkoutSet::new(date("2025-05-01"), "Chest", "Barbell Bench Press", 40.0, 10);
        assert_eq!(set.volume(), 400.0);
    }

    #[test]
    fn test_placeholder_is_not_logged() {
        let row = WorkoutSet::placeholder(date("2025-05-01"), "Chest", "Dumbbell Fly");
        assert_eq!(row.weight, 0.0);
        assert_eq!(row.reps, 0);
        assert!(!row.is_logged());
    }

    #[test]
    fn test_date_serializes_as_iso_string() {
        let set = WorkoutSet::new(date("2025-05-01"), "Legs", "Squat", 50.0, 8);
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"2025-05-01\""));

        let back: WorkoutSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
