//! Integration tests for the irontrack binary.
//!
//! These tests verify end-to-end behavior including:
//! - Store seeding and idempotence
//! - The log/view workflow
//! - Catalog queries over defaults plus custom entries
//! - Reports and exports

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("irontrack"))
}

fn log_set(
    data_dir: &std::path::Path,
    date: &str,
    category: &str,
    exercise: &str,
    weight: &str,
    reps: &str,
) {
    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(data_dir)
        .args(["--date", date])
        .args(["--category", category])
        .args(["--exercise", exercise])
        .args(["--weight", weight])
        .args(["--reps", reps])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal workout logger"));
}

#[test]
fn test_init_seeds_default_catalog() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Initialized workout file with 10 placeholder rows",
        ));

    let contents = fs::read_to_string(data_dir.join("workouts.csv")).expect("read store");
    assert_eq!(contents.lines().count(), 11); // header + 10 placeholders
    assert!(contents.starts_with("date,category,exercise,weight,reps"));
    assert!(contents.contains("Barbell Bench Press"));
    assert!(contents.contains("Lateral Raise"));
}

#[test]
fn test_init_is_idempotent() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let contents = fs::read_to_string(data_dir.join("workouts.csv")).expect("read store");
    assert_eq!(contents.lines().count(), 11);
}

#[test]
fn test_log_then_view() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--date", "2025-05-01"])
        .args(["--category", "Chest"])
        .args(["--exercise", "Barbell Bench Press"])
        .args(["--weight", "60"])
        .args(["--reps", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: 5 reps @ 60kg"));

    cli()
        .arg("view")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--date", "2025-05-01"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Barbell Bench Press")
                .and(predicate::str::contains("5 reps @ 60kg")),
        );
}

#[test]
fn test_log_rejects_zero_reps() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--category", "Chest"])
        .args(["--exercise", "Dumbbell Fly"])
        .args(["--weight", "10"])
        .args(["--reps", "0"])
        .assert()
        .failure();
}

#[test]
fn test_view_empty_date_is_non_fatal() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("view")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--date", "1999-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts found"));
}

#[test]
fn test_add_exercise_title_cases_input() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("add-exercise")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--category", "chest"])
        .args(["--exercise", "incline press"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Custom exercise 'Incline Press' added to category 'Chest'",
        ));

    cli()
        .arg("catalog")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--category", "Chest"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Barbell Bench Press")
                .and(predicate::str::contains("Incline Press")),
        );
}

#[test]
fn test_catalog_lists_default_categories() {
    let temp_dir = setup_test_dir();

    let assert = cli()
        .arg("catalog")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for category in ["Arms", "Back", "Chest", "Legs", "Shoulders"] {
        assert!(stdout.contains(category), "missing category {}", category);
    }
}

#[test]
fn test_progress_sums_same_day_sets() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    log_set(&data_dir, "2025-05-01", "Chest", "Dumbbell Fly", "5", "10");
    log_set(&data_dir, "2025-05-01", "Chest", "Dumbbell Fly", "5", "8");
    log_set(&data_dir, "2025-05-02", "Chest", "Dumbbell Fly", "10", "5");

    cli()
        .arg("progress")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--exercise", "Dumbbell Fly"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("18")
                .and(predicate::str::contains("90.0"))
                .and(predicate::str::contains("50.0")),
        );
}

#[test]
fn test_consistency_counts_distinct_days() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Two sets on one day, another day in the same ISO week, one the week after
    log_set(&data_dir, "2025-04-28", "Chest", "Dumbbell Fly", "5", "10");
    log_set(&data_dir, "2025-04-28", "Chest", "Barbell Bench Press", "40", "5");
    log_set(&data_dir, "2025-04-30", "Legs", "Squat", "50", "8");
    log_set(&data_dir, "2025-05-05", "Back", "Barbell Row", "35", "8");

    cli()
        .arg("consistency")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--period", "week"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2025-W18")
                .and(predicate::str::contains("2025-W19")),
        );
}

#[test]
fn test_top_respects_limit() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    log_set(&data_dir, "2025-05-01", "Legs", "Leg Press", "30", "10"); // volume 300
    log_set(&data_dir, "2025-05-01", "Legs", "Squat", "20", "10"); // volume 200
    log_set(&data_dir, "2025-05-01", "Back", "Barbell Row", "10", "10"); // volume 100

    cli()
        .arg("top")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--limit", "2"])
        .args(["--metric", "volume"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Leg Press")
                .and(predicate::str::contains("Squat"))
                .and(predicate::str::contains("Barbell Row").not()),
        );
}

#[test]
fn test_placeholders_excluded_from_reports() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Seed only; every row has reps = 0
    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("progress")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--exercise", "Squat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No logged data"));

    cli()
        .arg("consistency")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No data available"));

    cli()
        .arg("categories")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No data available"));

    cli()
        .arg("top")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No data available"));
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let output = data_dir.join("export.csv");

    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();
    log_set(&data_dir, "2025-05-01", "Legs", "Squat", "50", "8");

    cli()
        .arg("export")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--format", "csv"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 11 rows"));

    let contents = fs::read_to_string(&output).expect("read export");
    assert!(contents.starts_with("date,category,exercise,weight,reps"));
    assert_eq!(contents.lines().count(), 12);
}

#[test]
fn test_export_json() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    let output = data_dir.join("export.json");

    log_set(&data_dir, "2025-05-01", "Legs", "Squat", "50", "8");

    cli()
        .arg("export")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--format", "json"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let contents = fs::read_to_string(&output).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&contents).expect("parse export");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 11); // 10 placeholders + 1 logged set

    let logged = rows
        .iter()
        .find(|r| r["reps"] == 8)
        .expect("logged set present");
    assert_eq!(logged["date"], "2025-05-01");
    assert_eq!(logged["exercise"], "Squat");
    assert_eq!(logged["weight"], 50.0);
}
