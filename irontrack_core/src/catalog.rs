//! Built-in exercise catalog and catalog queries.
//!
//! The selectable set of categories and exercises is the union of the
//! built-in defaults and whatever (category, exercise) pairs appear in the
//! stored table. Both queries are pure reads over an already-loaded table;
//! callers re-load before querying so the result reflects the latest
//! persisted state.

use crate::WorkoutSet;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<BTreeMap<&'static str, Vec<&'static str>>> =
    Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
///
/// Maps each built-in category to its built-in exercise list. These pairs
/// are always selectable, even on a completely empty store.
pub fn default_catalog() -> &'static BTreeMap<&'static str, Vec<&'static str>> {
    &DEFAULT_CATALOG
}

fn build_default_catalog() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut catalog = BTreeMap::new();

    catalog.insert("Chest", vec!["Barbell Bench Press", "Dumbbell Fly"]);
    catalog.insert("Back", vec!["Pull Ups", "Barbell Row"]);
    catalog.insert("Arms", vec!["Dumbbell Curls", "Tricep Pushdown"]);
    catalog.insert("Legs", vec!["Squat", "Leg Press"]);
    catalog.insert("Shoulders", vec!["Shoulder Press", "Lateral Raise"]);

    catalog
}

/// All selectable category names, sorted lexicographically.
///
/// The union of default category names and every distinct non-empty
/// `category` value present in `rows`.
pub fn categories(rows: &[WorkoutSet]) -> Vec<String> {
    let mut names: BTreeSet<String> = DEFAULT_CATALOG.keys().map(|c| c.to_string()).collect();

    for row in rows {
        if !row.category.is_empty() {
            names.insert(row.category.clone());
        }
    }

    names.into_iter().collect()
}

/// All selectable exercises within `category`, sorted lexicographically.
///
/// The union of the default exercise list for the category (empty when the
/// category is not a built-in one) and every distinct non-empty `exercise`
/// value in rows whose `category` matches exactly (case-sensitive).
pub fn exercises_for(category: &str, rows: &[WorkoutSet]) -> Vec<String> {
    let mut names: BTreeSet<String> = DEFAULT_CATALOG
        .get(category)
        .map(|exercises| exercises.iter().map(|e| e.to_string()).collect())
        .unwrap_or_default();

    for row in rows {
        if row.category == category && !row.exercise.is_empty() {
            names.insert(row.exercise.clone());
        }
    }

    names.into_iter().collect()
}
