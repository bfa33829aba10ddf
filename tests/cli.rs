#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("presence-cli").unwrap()
}

#[test]
fn preview_two_week_plan() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("planner.json");
    cli()
        .args([
            "--state",
            state.to_str().unwrap(),
            "preview",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-14",
            "--days",
            "1,3,5",
            "--start",
            "09:00 AM",
            "--end",
            "05:00 PM",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 day(s) | 8.0 h/day | 48.0 h total"))
        .stdout(predicate::str::contains("2024-01-07 → 2024-01-13"));
}

#[test]
fn preview_without_matching_day_warns() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("planner.json");
    // 2024-01-02 est un mardi, seul le lundi est coché
    cli()
        .args([
            "--state",
            state.to_str().unwrap(),
            "preview",
            "--from",
            "2024-01-02",
            "--to",
            "2024-01-02",
            "--days",
            "1",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("0 day(s)"))
        .stderr(predicate::str::contains("no scheduled day"));
}

#[test]
fn payload_prints_backend_body() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("planner.json");
    cli()
        .args([
            "--state",
            state.to_str().unwrap(),
            "payload",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-07",
            "--days",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"availability\""))
        .stdout(predicate::str::contains("2024-01-01"))
        .stdout(predicate::str::contains("\"start_time\": \"09:00\""));
}

#[test]
fn reversed_range_fails() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("planner.json");
    cli()
        .args([
            "--state",
            state.to_str().unwrap(),
            "preview",
            "--from",
            "2024-01-14",
            "--to",
            "2024-01-01",
            "--days",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date range"));
}
