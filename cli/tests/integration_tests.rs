use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Runs `sch` inside `dir` with a scrubbed logging environment.
fn sch(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sch"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("SCH_LOG_LEVEL")
        .env_remove("SCH_LOG_FORMAT")
        .env_remove("SCH_CONFIG")
        .output()
        .expect("failed to run sch")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn cwd_of(dir: &TempDir) -> String {
    fs::canonicalize(dir.path()).unwrap().display().to_string()
}

// ---------------------------------------------------------------------------
// log init
// ---------------------------------------------------------------------------

#[test]
fn test_log_init_defaults_path_to_cwd() {
    let dir = TempDir::new().unwrap();
    let output = sch(dir.path(), &["log", "init"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json = stdout_json(&output);
    assert_eq!(json["path"], serde_json::json!(["log", "init"]));
    assert_eq!(json["args"]["path"], cwd_of(&dir));
    assert_eq!(json["flags"], serde_json::json!({}));
}

#[test]
fn test_log_init_store_type() {
    let dir = TempDir::new().unwrap();
    let output = sch(dir.path(), &["log", "init", "--store-type", "gdrive"]);

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["flags"]["store-type"], "gdrive");
}

#[test]
fn test_log_init_repeated_store_config() {
    let dir = TempDir::new().unwrap();
    let output = sch(
        dir.path(),
        &["log", "init", "--store-config", "a", "--store-config", "b"],
    );

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["flags"]["store-config"],
        serde_json::json!(["a", "b"])
    );
}

#[test]
fn test_log_init_explicit_path() {
    let dir = TempDir::new().unwrap();
    let output = sch(dir.path(), &["log", "init", "/srv/logs", "-t", "s3"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["args"]["path"], "/srv/logs");
    assert_eq!(json["flags"]["store-type"], "s3");
}

// ---------------------------------------------------------------------------
// Rejected command lines
// ---------------------------------------------------------------------------

fn assert_usage_error(args: &[&str], kind: &str) {
    let dir = TempDir::new().unwrap();
    let output = sch(dir.path(), args);

    assert_eq!(output.status.code(), Some(2), "args: {args:?}");
    assert!(output.stdout.is_empty());
    let err = stderr(&output);
    assert!(err.starts_with("error: "), "stderr: {err}");
    assert!(err.contains(kind), "expected {kind} in: {err}");
}

#[test]
fn test_unknown_flag() {
    assert_usage_error(&["log", "init", "--bogus"], "invalid-flag");
}

#[test]
fn test_unknown_command() {
    assert_usage_error(&["log", "frobnicate"], "invalid-name");
}

#[test]
fn test_flag_without_value() {
    assert_usage_error(&["log", "init", "--store-type"], "no-value-found-for-flag");
}

#[test]
fn test_repeated_single_flag() {
    assert_usage_error(
        &["log", "init", "--store-type", "a", "--store-type", "b"],
        "multiple-values-not-allowed",
    );
}

#[test]
fn test_group_without_command() {
    assert_usage_error(&["log"], "invalid-name");
}

#[test]
fn test_no_tokens() {
    assert_usage_error(&[], "invalid-name");
}

// ---------------------------------------------------------------------------
// Logging and configuration
// ---------------------------------------------------------------------------

#[test]
fn test_debug_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let output = sch(dir.path(), &["--log-level", "debug", "log", "init"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("parsing command line"));
    stdout_json(&output);
}

#[test]
fn test_quiet_by_default() {
    let dir = TempDir::new().unwrap();
    let output = sch(dir.path(), &["log", "init"]);

    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "stderr: {}", stderr(&output));
}

#[test]
fn test_config_file_sets_json_logging() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("sch.yml");
    fs::write(&config, "log:\n  level: debug\n  format: json\n").unwrap();

    let output = sch(
        dir.path(),
        &["--config", config.to_str().unwrap(), "log", "init"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let first_line = stderr(&output).lines().next().unwrap_or_default().to_string();
    let event: serde_json::Value = serde_json::from_str(&first_line).expect("log line is not JSON");
    assert_eq!(event["level"], "DEBUG");
}

#[test]
fn test_config_from_environment() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("sch.yml");
    fs::write(&config, "log:\n  level: debug\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_sch"))
        .args(["log", "init"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SCH_LOG_LEVEL")
        .env_remove("SCH_LOG_FORMAT")
        .env("SCH_CONFIG", &config)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stderr(&output).contains("parsing command line"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = sch(dir.path(), &["--config", "missing.yml", "log", "init"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: I/O error"));
}

#[test]
fn test_invalid_log_level_fails() {
    let dir = TempDir::new().unwrap();
    let output = sch(dir.path(), &["--log-level", "sch=loud", "log", "init"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("logging error"));
}

#[test]
fn test_save_config_writes_effective_settings() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("saved.yml");

    let output = sch(
        dir.path(),
        &[
            "--log-level",
            "info",
            "--log-format",
            "pretty",
            "--save-config",
            target.to_str().unwrap(),
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let saved = fs::read_to_string(&target).unwrap();
    assert!(saved.contains("level: info"));
    assert!(saved.contains("format: pretty"));
}
