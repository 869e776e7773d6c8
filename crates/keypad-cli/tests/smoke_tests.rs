//! Smoke tests for the keypad CLI
//!
//! Runs the real binary end to end: arguments, stdin, exit codes.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the keypad binary
fn keypad() -> Command {
    Command::cargo_bin("keypad").expect("keypad binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help_flag() {
    keypad()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("press"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag() {
    keypad()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keypad"));
}

#[test]
fn test_no_args_fails() {
    keypad().assert().failure();
}

// ============================================================================
// Press
// ============================================================================

#[test]
fn test_press_left_to_right() {
    keypad()
        .args(["press", "2+3*4="])
        .assert()
        .success()
        .stdout("20\n");
}

#[test]
fn test_press_multiple_chunks() {
    keypad()
        .args(["press", "5+3+", "2="])
        .assert()
        .success()
        .stdout("10\n");
}

#[test]
fn test_press_float_correction() {
    keypad()
        .args(["press", "0.1+0.2="])
        .assert()
        .success()
        .stdout("0.3\n");
}

#[test]
fn test_press_leading_hyphen_key() {
    keypad()
        .args(["press", "9", "-1="])
        .assert()
        .success()
        .stdout("8\n");
}

#[test]
fn test_press_with_history() {
    keypad()
        .args(["press", "--history", "1+1=", "3*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expression: 3 *"))
        .stdout(predicate::str::contains("1 + 1 = 2"));
}

#[test]
fn test_press_json() {
    let output = keypad()
        .args(["--format", "json", "press", "6*7="])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["display_text"], "42");
    assert_eq!(value["phase"], "result_displayed");
}

#[test]
fn test_press_unknown_key_fails() {
    keypad()
        .args(["press", "1%2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key: %"));
}

#[test]
fn test_press_division_by_zero_fails() {
    keypad()
        .args(["press", "1/0="])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Non-finite result"));
}

#[test]
fn test_press_sign_toggle_flag() {
    keypad()
        .args(["--sign-toggle", "force-negative", "press", "5~~3"])
        .assert()
        .success()
        .stdout("47\n");

    keypad()
        .args(["press", "5~~3"])
        .assert()
        .success()
        .stdout("53\n");
}

// ============================================================================
// Repl
// ============================================================================

#[test]
fn test_repl_reads_lines() {
    keypad()
        .arg("repl")
        .write_stdin("2+3\n*4=\n")
        .assert()
        .success()
        .stdout("3\n20\n");
}

#[test]
fn test_repl_continues_after_error() {
    keypad()
        .args(["-q", "repl"])
        .write_stdin("12\n%\n+1=\nquit\n")
        .assert()
        .success()
        .stdout("12\n12\n13\n")
        .stderr(predicate::str::contains("Error: Unknown key: %"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_defaults() {
    keypad()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("sign_toggle: flip"))
        .stdout(predicate::str::contains("history_capacity: 100"));
}

#[test]
fn test_config_file_and_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keypad.yaml");
    fs::write(
        &path,
        "format: json\ncalculator:\n  sign_toggle: force-negative\n  history_capacity: 3\n",
    )
    .unwrap();

    keypad()
        .args(["--config", path.to_str().unwrap(), "press", "5~~3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"display_text\":\"47\""));

    keypad()
        .args([
            "--config",
            path.to_str().unwrap(),
            "--format",
            "text",
            "config",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("history_capacity: 3"))
        .stdout(predicate::str::contains("format: text"));
}

#[test]
fn test_config_file_missing() {
    keypad()
        .args(["--config", "/nonexistent/keypad.yaml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_config_file_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "format: [not, a, format]\n").unwrap();

    keypad()
        .args(["--config", path.to_str().unwrap(), "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
