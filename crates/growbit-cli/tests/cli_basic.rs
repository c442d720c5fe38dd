//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_growbit"))
        .arg("--data-dir")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn acquire(dir: &Path, template_id: &str) -> String {
    let habit = run_json(dir, &["habit", "acquire", template_id]);
    habit["id"].as_str().unwrap().to_string()
}

#[test]
fn test_template_list() {
    let dir = TempDir::new().unwrap();
    let templates = run_json(dir.path(), &["template", "list"]);
    let ids: Vec<&str> = templates
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"run-3w"));
    assert!(ids.contains(&"read-20"));
}

#[test]
fn test_template_list_by_category() {
    let dir = TempDir::new().unwrap();
    let templates = run_json(dir.path(), &["template", "list", "--category", "productivity"]);
    for t in templates.as_array().unwrap() {
        assert_eq!(t["category_id"], "productivity");
    }
    let (_, stderr, code) = run_cli(dir.path(), &["template", "list", "--category", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown category"));
}

#[test]
fn test_habit_acquire_and_list() {
    let dir = TempDir::new().unwrap();
    let id = acquire(dir.path(), "read-20");

    let list = run_json(dir.path(), &["habit", "list"]);
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], id.as_str());
    assert_eq!(rows[0]["status"], "in-progress");
    assert_eq!(rows[0]["program"], "Daily: 21:00");
}

#[test]
fn test_habit_acquire_unknown_template() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["habit", "acquire", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_habit_toggle_completes_day() {
    let dir = TempDir::new().unwrap();
    let id = acquire(dir.path(), "read-20");

    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["habit", "toggle", &id, "21:00", "--date", "2025-03-05"],
    );
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("day complete"));

    let habit = run_json(dir.path(), &["habit", "show", &id]);
    assert_eq!(habit["slot_progress"]["2025-03-05"]["21:00"], true);

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["habit", "toggle", &id, "21:00", "--date", "2025-03-05", "--undo"],
    );
    assert_eq!(code, 0);
    assert!(!stdout.contains("day complete"));
}

#[test]
fn test_habit_toggle_rejects_bad_time() {
    let dir = TempDir::new().unwrap();
    let id = acquire(dir.path(), "read-20");
    let (_, _, code) = run_cli(dir.path(), &["habit", "toggle", &id, "9:00"]);
    assert_ne!(code, 0);
}

#[test]
fn test_habit_program_weekly() {
    let dir = TempDir::new().unwrap();
    let id = acquire(dir.path(), "deep-work");

    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["habit", "program", &id, "weekly", "mon=07:00", "fri=07:00,25:00"],
    );
    assert_eq!(code, 0, "{stderr}");
    assert_eq!(stdout.trim(), "Weekly: Mon 07:00 | Fri 07:00");
    assert!(stderr.contains("ignored slot"));

    let week = run_json(dir.path(), &["program", "week"]);
    let days = week["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["slots"][0]["time"], "07:00");
    assert!(days[1]["slots"].as_array().unwrap().is_empty());
}

#[test]
fn test_habit_rename_status_and_streak() {
    let dir = TempDir::new().unwrap();
    let id = acquire(dir.path(), "water-8");

    let (_, _, code) = run_cli(dir.path(), &["habit", "rename", &id, "Hydrate"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(dir.path(), &["habit", "status", &id, "acquired"]);
    assert_eq!(code, 0);

    let habit = run_json(dir.path(), &["habit", "show", &id]);
    assert_eq!(habit["title"], "Hydrate");
    assert_eq!(habit["status"], "acquired");

    let (stdout, _, code) = run_cli(dir.path(), &["habit", "streak", &id]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "0");
}

#[test]
fn test_habit_program_unknown_habit_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) =
        run_cli(dir.path(), &["habit", "program", "ghost", "daily", "08:00"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Habit not found"));
}

#[test]
fn test_habit_show_unknown() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["habit", "show", "ghost"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("habit not found"));
}

#[test]
fn test_settings_round_trip() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["settings", "get", "pomodoro.work_sec"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1500");

    let (_, _, code) = run_cli(dir.path(), &["settings", "set", "week_starts_on", "monday"]);
    assert_eq!(code, 0);
    let settings = run_json(dir.path(), &["settings", "list"]);
    assert_eq!(settings["week_starts_on"], "monday");

    let (_, _, code) = run_cli(dir.path(), &["settings", "set", "no_such_key", "1"]);
    assert_eq!(code, 1);

    let (_, _, code) = run_cli(dir.path(), &["settings", "reset"]);
    assert_eq!(code, 0);
    let settings = run_json(dir.path(), &["settings", "list"]);
    assert_eq!(settings["week_starts_on"], "sunday");
}

#[test]
fn test_pomodoro_next_records_work_session() {
    let dir = TempDir::new().unwrap();
    let outcome = run_json(dir.path(), &["pomodoro", "next"]);
    assert_eq!(outcome["next_mode"], "break");
    assert_eq!(outcome["session"]["duration_sec"], 1500);

    let cycle = run_json(dir.path(), &["pomodoro", "status"]);
    assert_eq!(cycle["mode"], "break");
    assert_eq!(cycle["completed_work"], 1);

    let recent = run_json(dir.path(), &["pomodoro", "recent"]);
    assert_eq!(recent.as_array().unwrap().len(), 1);
}

#[test]
fn test_pomodoro_record_and_stats() {
    let dir = TempDir::new().unwrap();
    run_json(dir.path(), &["pomodoro", "record", "--minutes", "30"]);
    run_json(dir.path(), &["pomodoro", "record", "--minutes", "5", "--mode", "break"]);

    let recent = run_json(dir.path(), &["pomodoro", "recent"]);
    let recent = recent.as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["mode"], "break");
    assert_eq!(recent[0]["duration_sec"], 300);
    assert_eq!(recent[1]["mode"], "work");
    assert_eq!(recent[1]["duration_sec"], 1800);

    // Totals depend on which day the session started, so only check they agree.
    let stats = run_json(dir.path(), &["pomodoro", "stats"]);
    let today_sec = stats["today_sec"].as_u64().unwrap();
    assert!(today_sec == 0 || today_sec == 1800);
    assert!(stats["week"]["count"].as_u64().unwrap() <= 1);
}

#[test]
fn test_pomodoro_record_rejects_huge_minutes() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) =
        run_cli(dir.path(), &["pomodoro", "record", "--minutes", "100000000"]);
    assert_eq!(code, 1, "{stderr}");
    assert!(stdout.is_empty());
    assert!(stderr.contains("minutes out of range"));

    let recent = run_json(dir.path(), &["pomodoro", "recent"]);
    assert!(recent.as_array().unwrap().is_empty());
}

#[test]
fn test_pomodoro_next_alert_follows_setting() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["pomodoro", "next"]);
    assert_eq!(code, 0, "{stderr}");
    let outcome: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(outcome["notified"], true);
    assert!(stderr.contains("Pomodoro finished"));

    let (_, _, code) = run_cli(dir.path(), &["settings", "set", "notify_on_pomodoro_end", "false"]);
    assert_eq!(code, 0);
    // Break -> work, then work -> break again without an alert.
    run_json(dir.path(), &["pomodoro", "next"]);
    let (stdout, stderr, code) = run_cli(dir.path(), &["pomodoro", "next"]);
    assert_eq!(code, 0, "{stderr}");
    let outcome: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(outcome["session"].is_object());
    assert_eq!(outcome["notified"], false);
    assert!(!stderr.contains("Pomodoro finished"));
}

#[test]
fn test_reminders_sync() {
    let dir = TempDir::new().unwrap();
    acquire(dir.path(), "run-3w");

    let report = run_json(dir.path(), &["reminders", "sync", "--enable"]);
    assert_eq!(report["scheduled"], 3);

    let report = run_json(dir.path(), &["reminders", "sync", "--disable"]);
    assert_eq!(report["cancelled"], 3);
    assert_eq!(report["scheduled"], 0);
}
