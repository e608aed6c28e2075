//! Integration tests for the jcal binary.
//!
//! These tests verify end-to-end behavior including:
//! - Profile setup and persistence
//! - Weekly and daily projection output
//! - Measurement logging and projected-vs-actual comparison
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("jcal"))
}

/// Save the reference profile: Wednesday start, -167 kcal/day
fn set_profile(data_dir: &Path) {
    cli()
        .args(["profile", "set", "--data-dir"])
        .arg(data_dir)
        .args([
            "--age",
            "35",
            "--weight",
            "200",
            "--height-feet",
            "5",
            "--height-inches",
            "9",
            "--gender",
            "female",
            "--eaten",
            "1800",
            "--exercise",
            "300",
            "--goal",
            "180",
            "--start-date",
            "2024-01-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved"));
}

fn json_output(data_dir: &Path, args: &[&str]) -> Value {
    let output = cli()
        .args(args)
        .arg("--data-dir")
        .arg(data_dir)
        .args(["--today", "2024-01-17", "--json"])
        .output()
        .expect("run jcal");
    assert!(output.status.success(), "jcal {:?} failed", args);
    serde_json::from_slice(&output.stdout).expect("valid JSON output")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Weight projection from a daily calorie balance",
        ));
}

#[test]
fn test_commands_require_profile() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("project")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No profile saved"));
}

#[test]
fn test_profile_set_writes_json() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    let contents = fs::read_to_string(temp_dir.path().join("profile.json")).unwrap();
    let profile: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(profile["start_date"], "2024-01-10");
    assert_eq!(profile["gender"], "female");
    assert_eq!(profile["goal_weight"], 180.0);
}

#[test]
fn test_bmr_output() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .arg("bmr")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1667 kcal/day"))
        .stdout(predicate::str::contains("-167 kcal/day"));
}

#[test]
fn test_range_command() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .args(["range", "1", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout("2024-01-10..2024-01-14\n");

    cli()
        .args(["range", "3", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout("2024-01-22..2024-01-28\n");
}

#[test]
fn test_week_zero_rejected() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .args(["week", "0", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_huge_week_number_rejected() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    for command in ["week", "range"] {
        cli()
            .args([command, "20000000", "--data-dir"])
            .arg(temp_dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("10000"))
            .stderr(predicate::str::contains("panicked").not());
    }

    cli()
        .args(["range", "10000", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success();
}

#[test]
fn test_project_json_series() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    let rows = json_output(temp_dir.path(), &["project"]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 62);

    assert_eq!(rows[0]["projection"]["week"], 1);
    assert_eq!(rows[0]["projection"]["start_weight"], 200.0);
    assert_eq!(rows[0]["range"]["start_date"], "2024-01-10");
    assert_eq!(rows[0]["range"]["end_date"], "2024-01-14");
    assert_eq!(rows[1]["range"]["start_date"], "2024-01-15");
    assert_eq!(rows[1]["is_current"], true);

    let last = &rows[61]["projection"];
    assert!(last["start_weight"].as_f64().unwrap() <= 180.0);
}

#[test]
fn test_week_json_days() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    let days = json_output(temp_dir.path(), &["week", "1"]);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 5);
    assert_eq!(days[0]["day_name"], "Wednesday");
    assert_eq!(days[0]["date"], "2024-01-10");
    assert_eq!(days[4]["day_name"], "Sunday");

    let days = json_output(temp_dir.path(), &["week", "2"]);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day_name"], "Monday");
}

#[test]
fn test_logged_weight_appears_in_projection() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    for (date, weight) in [("2024-01-15", "199.9"), ("2024-01-18", "199.2")] {
        cli()
            .args(["log", "--date", date, "--weight", weight, "--data-dir"])
            .arg(temp_dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged"));
    }

    let rows = json_output(temp_dir.path(), &["project"]);
    assert_eq!(rows[0]["actual_weight"], Value::Null);
    assert_eq!(rows[1]["actual_weight"], 199.2);

    // Text view shows the actual and marks the current week
    cli()
        .args(["project", "--today", "2024-01-17", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("199.2"))
        .stdout(predicate::str::contains("this week"));
}

#[test]
fn test_log_merges_fields() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .args(["log", "--date", "2024-01-11", "--weight", "199.5", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success();
    cli()
        .args(["log", "--date", "2024-01-11", "--eaten", "1750", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success();

    let contents = fs::read_to_string(temp_dir.path().join("measurements.json")).unwrap();
    let records: Value = serde_json::from_str(&contents).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["weight"], 199.5);
    assert_eq!(records[0]["calories_eaten"], 1750.0);
}

#[test]
fn test_log_requires_a_field() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .args(["log", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to log"));
}

#[test]
fn test_daily_goals_toggle() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .args(["profile", "goal-add", "Walk", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["log", "--date", "2024-01-12", "--done", "Walk", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Walk done"));

    cli()
        .args(["week", "1", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Walk"))
        .stdout(predicate::str::contains("[ ] Walk"));

    cli()
        .args(["log", "--date", "2024-01-12", "--done", "Walk", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Walk not done"));
}

#[test]
fn test_profile_set_keeps_daily_goals() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .args(["profile", "goal-add", "No soda", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success();
    set_profile(temp_dir.path());

    cli()
        .args(["profile", "show", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No soda"));
}

#[test]
fn test_summary_default_command() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .args(["--today", "2024-01-17", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("OVERVIEW"))
        .stdout(predicate::str::contains("Goal reached in week 62"))
        .stdout(predicate::str::contains("Current week:    2"));
}

#[test]
fn test_summary_json() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    let summary = json_output(temp_dir.path(), &["summary"]);
    assert_eq!(summary["bmr"], 1667);
    assert_eq!(summary["net_calories"], -167.0);
    assert_eq!(summary["weight_to_go"], 20.0);
    assert_eq!(summary["current_week"], 2);
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());
    let csv_path = temp_dir.path().join("export").join("weeks.csv");

    cli()
        .arg("export")
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 62 weeks"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("week,start_date,end_date,start_weight,end_weight,actual_weight")
    );
    assert_eq!(lines.next(), Some("1,2024-01-10,2024-01-14,200.0,199.8,"));
    assert_eq!(lines.count(), 61);
}

#[test]
fn test_profile_clear_removes_everything() {
    let temp_dir = setup_test_dir();
    set_profile(temp_dir.path());

    cli()
        .args(["log", "--date", "2024-01-11", "--weight", "199.5", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["profile", "clear", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success();

    assert!(!temp_dir.path().join("profile.json").exists());
    assert!(!temp_dir.path().join("measurements.json").exists());
}

#[test]
fn test_zero_balance_reports_cap() {
    let temp_dir = setup_test_dir();

    // BMR 1667 + 300 exercise = 1967 eaten
    cli()
        .args(["profile", "set", "--data-dir"])
        .arg(temp_dir.path())
        .args([
            "--age", "35", "--weight", "200", "--height-feet", "5", "--height-inches", "9",
            "--gender", "female", "--eaten", "1967", "--exercise", "300", "--goal", "180",
            "--start-date", "2024-01-10",
        ])
        .assert()
        .success();

    let rows = json_output(temp_dir.path(), &["project"]);
    assert_eq!(rows.as_array().unwrap().len(), 104);

    cli()
        .args(["project", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal not reached within 104 weeks"));
}
