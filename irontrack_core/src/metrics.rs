//! Aggregation queries over the workout table.
//!
//! These feed the progress reports: a per-exercise trend series, a
//! consistency count, and two ranked distributions. Each function filters
//! to real logged sets (`reps > 0`) before grouping, so placeholder rows
//! never contribute to any aggregate, and each returns an empty result for
//! an input with no qualifying rows.

use crate::{Period, UsageMetric, WorkoutSet};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// How many exercises the top-exercises report shows unless told otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// One date on the trend line for a single exercise.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub reps: u32,
    pub weight: f64,
    pub volume: f64,
}

/// Distinct workout days within one calendar period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsistencyBucket {
    /// Period label: `YYYY-Www` for weeks, `YYYY-MM` for months.
    pub period: String,
    pub workout_days: u32,
}

/// A category's share of training under the chosen metric.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryUsage {
    pub category: String,
    /// Set count or summed volume, depending on the metric.
    pub value: f64,
}

/// An exercise's total under the chosen metric.
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseUsage {
    pub exercise: String,
    /// Set count or summed volume, depending on the metric.
    pub value: f64,
}

/// Per-date reps, weight, and volume sums for one exercise, ascending by
/// date.
///
/// Weight is summed across same-day sets, not averaged; the trend charts
/// downstream expect summed values.
pub fn exercise_progress(rows: &[WorkoutSet], exercise: &str) -> Vec<ProgressPoint> {
    let mut by_date: BTreeMap<NaiveDate, (u32, f64, f64)> = BTreeMap::new();

    for row in rows
        .iter()
        .filter(|r| r.is_logged() && r.exercise == exercise)
    {
        let totals = by_date.entry(row.date).or_insert((0, 0.0, 0.0));
        totals.0 += row.reps;
        totals.1 += row.weight;
        totals.2 += row.volume();
    }

    by_date
        .into_iter()
        .map(|(date, (reps, weight, volume))| ProgressPoint {
            date,
            reps,
            weight,
            volume,
        })
        .collect()
}

/// Count of distinct workout dates per period, ascending by period.
pub fn workout_consistency(rows: &[WorkoutSet], period: Period) -> Vec<ConsistencyBucket> {
    let mut days: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();

    for row in rows.iter().filter(|r| r.is_logged()) {
        days.entry(period_key(row.date, period))
            .or_default()
            .insert(row.date);
    }

    days.into_iter()
        .map(|(period, dates)| ConsistencyBucket {
            period,
            workout_days: dates.len() as u32,
        })
        .collect()
}

/// Period label for a date.
///
/// Both forms are zero-padded so a plain string sort orders them
/// chronologically.
fn period_key(date: NaiveDate, period: Period) -> String {
    match period {
        Period::Week => {
            let week = date.iso_week();
            format!("{:04}-W{:02}", week.year(), week.week())
        }
        Period::Month => format!("{:04}-{:02}", date.year(), date.month()),
    }
}

/// Sets or volume per category, descending by the chosen metric.
pub fn category_distribution(rows: &[WorkoutSet], metric: UsageMetric) -> Vec<CategoryUsage> {
    ranked_totals(rows, metric, |r| &r.category)
        .into_iter()
        .map(|(category, value)| CategoryUsage { category, value })
        .collect()
}

/// Top `n` exercises by the chosen metric, descending.
pub fn top_exercises(rows: &[WorkoutSet], n: usize, metric: UsageMetric) -> Vec<ExerciseUsage> {
    let mut ranked: Vec<ExerciseUsage> = ranked_totals(rows, metric, |r| &r.exercise)
        .into_iter()
        .map(|(exercise, value)| ExerciseUsage { exercise, value })
        .collect();
    ranked.truncate(n);
    ranked
}

/// Group logged rows by `key`, total the metric, and sort descending by
/// value. Ties break on the label so output order is deterministic.
fn ranked_totals<'a>(
    rows: &'a [WorkoutSet],
    metric: UsageMetric,
    key: impl Fn(&'a WorkoutSet) -> &'a str,
) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for row in rows.iter().filter(|r| r.is_logged()) {
        let value = match metric {
            UsageMetric::Sets => 1.0,
            UsageMetric::Volume => row.volume(),
        };
        *totals.entry(key(row)).or_insert(0.0) += value;
    }

    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}
