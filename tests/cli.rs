//! Binary startup tests
//!
//! Runs the built executable with a scratch config and data directory.

use std::fs;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const MISSING_KEYS: &str =
    "ERROR: set the LANGFUSE_PUBLIC_KEY and LANGFUSE_PRIVATE_KEY environment variables";

fn command(scratch: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_langfuse-mcp"));
    command
        .current_dir(scratch.path())
        .env("XDG_CONFIG_HOME", scratch.path())
        .env("XDG_DATA_HOME", scratch.path())
        .env("HOME", scratch.path())
        .env_remove("LANGFUSE_PUBLIC_KEY")
        .env_remove("LANGFUSE_PRIVATE_KEY")
        .env_remove("LANGFUSE_DOMAIN")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null());
    command
}

fn run(args: &[&str], env: &[(&str, &str)]) -> Output {
    let scratch = TempDir::new().unwrap();
    let config = scratch.path().join("langfuse-mcp.yml");
    fs::write(&config, "log_level: info\n").unwrap();

    let mut command = command(&scratch);
    command.arg("--config").arg(&config).args(args);
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn test_missing_keys_exit_with_status_one() {
    let output = run(&[], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(MISSING_KEYS));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_one_missing_key_is_enough_to_fail() {
    let output = run(&["serve"], &[("LANGFUSE_PUBLIC_KEY", "pk-lf-test")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(MISSING_KEYS));
}

#[test]
fn test_serve_exits_cleanly_on_eof() {
    let output = run(
        &["serve"],
        &[("LANGFUSE_PUBLIC_KEY", "pk-lf-test"), ("LANGFUSE_PRIVATE_KEY", "sk-lf-test")],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_tools_prints_the_catalog() {
    let output = run(&["tools"], &[]);
    assert!(output.status.success());

    let tools: Value = serde_json::from_slice(&output.stdout).unwrap();
    let tools = tools.as_array().unwrap();
    assert_eq!(tools.len(), 7);
    assert_eq!(tools[0]["name"], "query_llm_metrics");
    assert_eq!(tools[6]["name"], "get_projects");
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[test]
fn test_config_fallback_warning_is_logged() {
    let scratch = TempDir::new().unwrap();
    fs::write(scratch.path().join("langfuse-mcp.yml"), "log_level: [unclosed\n").unwrap();

    let output = command(&scratch).arg("tools").output().unwrap();
    assert!(output.status.success());

    let log = fs::read_to_string(scratch.path().join("langfuse-mcp/logs/langfuse-mcp.log")).unwrap();
    assert!(log.contains("Failed to load config from langfuse-mcp.yml"), "log: {}", log);
}
