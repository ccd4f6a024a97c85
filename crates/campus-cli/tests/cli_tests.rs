//! Integration tests for the `campus` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the event,
//! students and modules subcommands through the actual binary, with the event
//! store in a temporary directory.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn students_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/studenti.json")
}

fn modules_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/moduli.json")
}

fn store_in(dir: &TempDir) -> PathBuf {
    dir.path().join("events.json")
}

/// A `campus` command bound to the given event store.
fn campus(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("campus").unwrap();
    cmd.env("CAMPUS_STORE", store).env_remove("RUST_LOG");
    cmd
}

fn add(store: &Path, title: &str, time: &str, date: &str) -> assert_cmd::assert::Assert {
    campus(store)
        .args(["event", "add", "--title", title, "--time", time, "--date", date])
        .assert()
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn add_writes_store_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01")
        .success()
        .stdout(predicate::str::contains("Added event #0"));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(raw[0]["title"], "Lezione Angular");
    assert_eq!(raw[0]["type"], "lecture");
}

#[test]
fn overlapping_add_is_refused() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01").success();

    add(&store, "Pausa", "12:30 - 14:00", "2025-06-01")
        .failure()
        .stderr(predicate::str::contains("overlaps"))
        .stderr(predicate::str::contains("Lezione Angular"))
        .stderr(predicate::str::contains("--force"));

    campus(&store)
        .args(["event", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pausa").not());
}

#[test]
fn adjacent_and_other_day_adds_succeed() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01").success();

    add(&store, "Pausa Pranzo", "13:00 - 14:00", "2025-06-01").success();
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-02").success();
}

#[test]
fn force_adds_overlapping_event() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01").success();

    campus(&store)
        .args([
            "event", "add", "--title", "Recupero", "--time", "10:00 - 11:00", "--date",
            "2025-06-01", "--type", "lab", "--force",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added event #1"));
}

#[test]
fn malformed_time_is_stored_with_warning() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01").success();

    add(&store, "Riunione", "mattina", "2025-06-01")
        .success()
        .stderr(predicate::str::contains("overlap check skipped"));
}

#[test]
fn check_reports_overlap_and_free() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01").success();

    campus(&store)
        .args(["event", "check", "--time", "12:30 - 14:00", "--date", "2025-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("overlap"))
        .stdout(predicate::str::contains("Lezione Angular (30 min)"));

    campus(&store)
        .args(["event", "check", "--time", "13:00 - 14:00", "--date", "2025-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::diff("free\n"));

    campus(&store)
        .args(["event", "check", "--time", "09:00 - 13:00", "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::diff("free\n"));
}

#[test]
fn check_warns_when_time_is_not_recognized() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01").success();

    campus(&store)
        .args(["event", "check", "--time", "mattina", "--date", "2025-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::diff("free\n"))
        .stderr(predicate::str::contains("overlap check skipped"));
}

#[test]
fn agenda_lists_day_in_time_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Laboratorio Java", "14:00 - 18:00", "2025-06-01").success();
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01").success();
    add(&store, "Esame Database", "09:00 - 11:00", "2025-06-02").success();

    let output = campus(&store)
        .args(["event", "agenda", "--date", "2025-06-01"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Lezione Angular"));
    assert!(lines[1].contains("Laboratorio Java"));
}

#[test]
fn free_lists_gaps_and_first_fit() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Lezione Angular", "09:00 - 13:00", "2025-06-01").success();
    add(&store, "Laboratorio Java", "14:00 - 18:00", "2025-06-01").success();

    campus(&store)
        .args(["event", "free", "--date", "2025-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "08:00 - 09:00 (60 min)\n13:00 - 14:00 (60 min)\n",
        ));

    campus(&store)
        .args(["event", "free", "--date", "2025-06-01", "--min", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No free slot of 90 minutes"));
}

#[test]
fn free_rejects_empty_window() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["event", "free", "--date", "2025-06-01", "--from", "18:00", "--to", "08:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}

#[test]
fn remove_and_clear() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    add(&store, "Prima", "09:00 - 10:00", "2025-06-01").success();
    add(&store, "Seconda", "10:00 - 11:00", "2025-06-01").success();

    campus(&store)
        .args(["event", "remove", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 'Prima'"));

    campus(&store)
        .args(["event", "remove", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No event at position 7"));

    campus(&store)
        .args(["event", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 events"));

    campus(&store)
        .args(["event", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn store_flag_overrides_env() {
    let dir = TempDir::new().unwrap();
    let env_store = dir.path().join("env.json");
    let flag_store = dir.path().join("flag.json");

    campus(&env_store)
        .args(["--store"])
        .arg(&flag_store)
        .args(["event", "add", "--title", "T", "--time", "09:00 - 10:00", "--date", "2025-06-01"])
        .assert()
        .success();

    assert!(flag_store.exists());
    assert!(!env_store.exists());
}

#[test]
fn unknown_event_type_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args([
            "event", "add", "--title", "T", "--time", "09:00 - 10:00", "--date", "2025-06-01",
            "--type", "party",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown event type"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Students and modules
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn students_list_filters_and_sorts() {
    let dir = TempDir::new().unwrap();
    let output = campus(&store_in(&dir))
        .args(["students", "list", "-i", students_path(), "--sort", "media", "--desc"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("6650a2\tRossi\tAnna"));
    assert!(lines[1].starts_with("6650a1\tMarinelli\tLuca"));
    assert!(lines[1].ends_with("26.00"));
    assert!(lines[2].ends_with("\t-"));

    campus(&store_in(&dir))
        .args(["students", "list", "-i", students_path(), "--filter", "BIANCHI"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marco"))
        .stdout(predicate::str::contains("Anna").not());
}

#[test]
fn students_list_reads_stdin() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["students", "list"])
        .write_stdin(r#"[{"nome":"Sara","cognome":"Romano"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Romano\tSara"));
}

#[test]
fn students_list_rejects_unknown_sort_column() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["students", "list", "-i", students_path(), "--sort", "voto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sort column"));
}

#[test]
fn students_stats_text() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["students", "stats", "-i", students_path(), "6650a1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Luca Marinelli"))
        .stdout(predicate::str::contains("Average: 26.00 over 2 exams"))
        .stdout(predicate::str::contains("Grades >= 27: 1"))
        .stdout(predicate::str::contains("2025-06-01 28 DEV01 Angular"));
}

#[test]
fn students_stats_json() {
    let dir = TempDir::new().unwrap();
    let output = campus(&store_in(&dir))
        .args([
            "students", "stats", "-i", students_path(), "6650a1", "--threshold", "24", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["graded_exams"], 2);
    assert_eq!(value["summary"]["min"], 24);
    assert_eq!(value["high_grades"].as_array().unwrap().len(), 2);
    assert_eq!(value["high_grades"][0]["data"], "2025-06-01");
}

#[test]
fn students_stats_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["students", "stats", "-i", students_path(), "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Student not found: nobody"));
}

#[test]
fn invalid_records_file_fails() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["students", "list"])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse student records"));
}

#[test]
fn modules_list_sorted_by_hours() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["modules", "list", "-i", modules_path(), "--sort", "ore"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "SEC03\tCyber Security\t24\t2 enrolled\n\
             DB02\tDatabase\t32\t1 enrolled\n\
             DEV01\tAngular\t40\t1 enrolled\n",
        ));
}

#[test]
fn modules_list_filter() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["modules", "list", "-i", modules_path(), "--filter", "sql"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DB02"))
        .stdout(predicate::str::contains("DEV01").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// Enrollment and exams
// ─────────────────────────────────────────────────────────────────────────────

fn records_json(output: std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn enroll_updates_student_and_roster() {
    let dir = TempDir::new().unwrap();
    let output = campus(&store_in(&dir))
        .args(["students", "enroll", "-i", students_path(), "--modules", modules_path()])
        .args(["6650a3", "SEC03"])
        .output()
        .unwrap();
    let value = records_json(output);

    assert_eq!(value["studente"]["moduliIscritti"], serde_json::json!(["SEC03"]));
    let roster = value["modulo"]["studentiIscritti"].as_array().unwrap();
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[2]["studente_id"], "6650a3");
    assert_eq!(roster[2]["nome"], "Marco Bianchi");
}

#[test]
fn enroll_twice_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = campus(&store_in(&dir))
        .args(["students", "enroll", "-i", students_path(), "--modules", modules_path()])
        .args(["6650a1", "DEV01"])
        .output()
        .unwrap();
    let value = records_json(output);

    assert_eq!(
        value["studente"]["moduliIscritti"],
        serde_json::json!(["DEV01", "DB02"])
    );
    assert_eq!(value["modulo"]["studentiIscritti"].as_array().unwrap().len(), 1);
}

#[test]
fn withdraw_removes_from_both_sides() {
    let dir = TempDir::new().unwrap();
    let output = campus(&store_in(&dir))
        .args(["students", "withdraw", "-i", students_path(), "--modules", modules_path()])
        .args(["6650a1", "DB02"])
        .output()
        .unwrap();
    let value = records_json(output);

    assert_eq!(value["studente"]["moduliIscritti"], serde_json::json!(["DEV01"]));
    assert!(value["modulo"]["studentiIscritti"].as_array().unwrap().is_empty());
}

#[test]
fn enroll_unknown_module_fails() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["students", "enroll", "-i", students_path(), "--modules", modules_path()])
        .args(["6650a1", "XX99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Module not found: XX99"));
}

#[test]
fn add_exam_appends_module_snapshot() {
    let dir = TempDir::new().unwrap();
    let output = campus(&store_in(&dir))
        .args(["students", "add-exam", "-i", students_path(), "--modules", modules_path()])
        .args(["6650a2", "--module", "SEC03", "--grade", "27", "--date", "2025-06-20"])
        .args(["--note", "recupero"])
        .output()
        .unwrap();
    let value = records_json(output);

    let exams = value["esami"].as_array().unwrap();
    assert_eq!(exams.len(), 2);
    assert_eq!(exams[1]["voto"], 27);
    assert_eq!(exams[1]["data"], "2025-06-20");
    assert_eq!(exams[1]["note"], "recupero");
    assert_eq!(exams[1]["modulo"]["codice"], "SEC03");
    assert_eq!(exams[1]["modulo"]["ore"], 24);
}

#[test]
fn add_exam_unknown_student_fails() {
    let dir = TempDir::new().unwrap();
    campus(&store_in(&dir))
        .args(["students", "add-exam", "-i", students_path(), "--modules", modules_path()])
        .args(["nobody", "--module", "SEC03", "--grade", "27"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Student not found: nobody"));
}
