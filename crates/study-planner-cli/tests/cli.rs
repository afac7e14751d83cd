use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

fn study_plan() -> Command {
    Command::cargo_bin("study-plan").unwrap()
}

fn sections() -> Value {
    json!([
        { "title": "A", "estimated_minutes": 60, "topics": ["a1", "a2", "a3", "a4"], "order_index": 0 },
        { "title": "B", "estimated_minutes": 30, "order_index": 1 }
    ])
}

fn run_json(args: &[&str], stdin: &Value) -> Value {
    let output = study_plan()
        .args(args)
        .write_stdin(stdin.to_string())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_project_two_weeks() {
    let request = json!({
        "goal_id": "goal-1",
        "sections": sections(),
        "slots": [
            { "day": "Wednesday", "start_time": "18:00", "end_time": "18:30", "duration_minutes": 30 },
            { "day": "Monday", "start_time": "18:00", "end_time": "18:30", "duration_minutes": 30 }
        ],
        "weekly_hours": 1.0,
        "start_date": "2024-01-01"
    });
    let result = run_json(&["project"], &request);

    assert_eq!(result["total_weeks"], 2);
    assert_eq!(result["estimated_completion_date"], "2024-01-15");
    let weeks = result["weeks"].as_array().unwrap();
    assert_eq!(weeks[0]["plan"]["completion_percentage"], 67);
    assert_eq!(weeks[0]["sessions"][0]["day_of_week"], "Monday");
    assert_eq!(weeks[0]["sessions"][0]["activities"], json!(["a1", "a2", "a3"]));
    assert_eq!(weeks[0]["sessions"][0]["status"], "pending");
    assert_eq!(weeks[1]["plan"]["week_start_date"], "2024-01-08");
    assert_eq!(weeks[1]["sessions"][0]["topic"], "B");
    assert_eq!(weeks[1]["plan"]["completion_percentage"], 100);
}

#[test]
fn test_week_with_carryover() {
    let request = json!({
        "goal_id": "goal-1",
        "week_number": 2,
        "week_start_date": "2024-01-08",
        "slots": [
            { "day": "Tuesday", "start_time": "07:00", "end_time": "07:30", "duration_minutes": 30 },
            { "day": "Monday", "start_time": "07:00", "end_time": "07:30", "duration_minutes": 30 }
        ],
        "resource": { "title": "Course", "sections": sections() },
        "completed_section_titles": ["A"],
        "carryover": [{
            "day_of_week": "Friday", "start_time": "09:00", "end_time": "10:00",
            "duration_minutes": 60, "topic": "A", "activities": ["finish a4"], "status": "missed"
        }]
    });
    let result = run_json(&["week"], &request);

    let sessions = result["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["day_of_week"], "Monday");
    assert_eq!(sessions[0]["topic"], "A");
    assert_eq!(sessions[0]["activities"], json!(["finish a4"]));
    assert_eq!(sessions[0]["status"], "pending");
    assert_eq!(sessions[1]["topic"], "B");
    assert_eq!(sessions[1]["activities"], json!(["Study B"]));
    assert_eq!(result["plan"]["focus_area"], "A, B");
    assert_eq!(result["plan"]["completion_percentage"], 0);
}

#[test]
fn test_sync_new_slot() {
    let request = json!({
        "new_slots": [
            { "day": "Monday", "start_time": "09:00", "end_time": "09:30", "duration_minutes": 30 }
        ],
        "resource": { "sections": sections() },
        "completed_section_titles": ["A"],
        "existing_sessions": []
    });
    let result = run_json(&["sync"], &request);
    assert_eq!(result["sessions"][0]["topic"], "B");
    assert_eq!(result["assigned_sections"], json!(["B"]));
}

#[test]
fn test_current_week_with_explicit_today() {
    study_plan()
        .args(["current-week", "--start", "2024-01-01", "--today", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""week_number":3"#))
        .stdout(predicate::str::contains(r#""week_start_date":"2024-01-15""#));
}

#[test]
fn test_current_week_rejects_bad_timezone() {
    study_plan()
        .args(["current-week", "--start", "2024-01-01", "--timezone", "Nowhere/Land"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn test_strict_mode_rejects_unknown_day() {
    let request = json!({
        "new_slots": [
            { "day": "Someday", "start_time": "09:00", "end_time": "09:30", "duration_minutes": 30 }
        ],
        "resource": { "sections": sections() }
    });
    study_plan()
        .arg("sync")
        .write_stdin(request.to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown weekday"));

    // Lenient mode sorts the unknown day as Monday and plans it.
    let result = run_json(&["sync", "--lenient"], &request);
    assert_eq!(result["sessions"][0]["day_of_week"], "Someday");
    assert_eq!(result["sessions"][0]["topic"], "A");
}

#[test]
fn test_malformed_json_fails() {
    study_plan()
        .arg("project")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse request JSON"));
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = std::env::temp_dir().join(format!("study-plan-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let config_path = dir.join("config.json");
    std::fs::write(&config_path, r#"{"max_activities": 1}"#).unwrap();

    let request = json!({
        "new_slots": [
            { "day": "Monday", "start_time": "09:00", "end_time": "09:30", "duration_minutes": 30 }
        ],
        "resource": { "sections": sections() }
    });
    let result = run_json(
        &["sync", "--config", config_path.to_str().unwrap()],
        &request,
    );
    assert_eq!(result["sessions"][0]["activities"], json!(["a1"]));

    std::fs::write(&config_path, r#"{"max_activities": 0}"#).unwrap();
    study_plan()
        .args(["sync", "--config", config_path.to_str().unwrap()])
        .write_stdin(request.to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_activities"));

    std::fs::remove_dir_all(&dir).ok();
}
