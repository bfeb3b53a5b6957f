#![forbid(unsafe_code)]

//! Core data model and business logic for the IronTrack workout log.
//!
//! This crate provides:
//! - Domain types (workout sets, periods, usage metrics)
//! - The CSV-backed store (seed, load, append)
//! - Catalog queries (selectable categories and exercises)
//! - Aggregation queries feeding the progress reports
//! - Configuration and logging setup shared by the binaries

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod metrics;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{categories, default_catalog, exercises_for};
pub use config::Config;
pub use store::WorkoutStore;
pub use metrics::{
    category_distribution, exercise_progress, top_exercises, workout_consistency, CategoryUsage,
    ConsistencyBucket, ExerciseUsage, ProgressPoint,
};
