//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

const WORK_TOML: &str = r#"
[host.basic.jump]
address = "203.0.113.10"

[host.basic.web01]
address = "10.0.0.5"
username = "ops"
proxy = "jump"

[host.basic.web02]
address = "10.0.0.6"
port = "3390"

[host.basic.db]
address = "10.0.1.7"
tunnel = "bastion"
settings = "wide"

[tunnel.bastion]
host = "jump"
localport = "13389"
key = "~/.ssh/bastion.pem"
user = "ec2-user"

[settings.wide]
width = 2560
height = 1440
scale = 150
"#;

fn write_config(dir: &Path) {
    fs::write(dir.join("work.toml"), WORK_TOML).expect("Failed to write work.toml");
}

/// Execute runrdp against `config_dir` and return the output
fn run_runrdp(config_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_runrdp"))
        .env("RUNRDP_CONFIG_ROOT", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute runrdp")
}

/// Execute runrdp with `input` written to its stdin
fn run_with_input(config_dir: &Path, args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_runrdp"))
        .env("RUNRDP_CONFIG_ROOT", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute runrdp");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for runrdp")
}

fn run_success(config_dir: &Path, args: &[&str]) -> std::process::Output {
    let output = run_runrdp(config_dir, args);
    assert!(
        output.status.success(),
        "runrdp {:?} failed with exit code {:?}. stderr: {}",
        args,
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

/// Verify that stdout contains only user-facing output (no JSON logs)
/// and that stderr carries no INFO logs by default (quiet mode)
#[test]
fn test_hosts_stdout_is_clean() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(temp_dir.path(), &["hosts"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );

    for name in ["jump", "web01", "web02", "db"] {
        assert!(stdout.contains(name), "missing host {} in: {}", name, stdout);
    }
    assert!(stdout.contains("work.toml"));
}

/// Verify that verbose mode emits structured logs on stderr only
#[test]
fn test_verbose_logs_go_to_stderr() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(temp_dir.path(), &["-v", "hosts"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains(r#""event":"core.app.startup_completed""#),
        "Verbose mode should log startup, got: {}",
        stderr
    );
    for line in stdout.lines() {
        assert!(
            !line.trim_start().starts_with('{'),
            "stdout should not contain JSON log lines, got: {}",
            line
        );
    }
}

#[test]
fn test_connect_applies_proxy_and_default_port() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(temp_dir.path(), &["connect", "web01", "--json"]);
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("connect --json should print JSON");

    assert_eq!(json["host"], "web01");
    assert_eq!(json["address"], "203.0.113.10");
    assert_eq!(json["port"], "3389");
    assert_eq!(json["username"], "ops");
    assert_eq!(json["password"], "");
    assert!(json["tunnel"].is_null());
}

#[test]
fn test_connect_no_proxy_and_overrides() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(
        temp_dir.path(),
        &[
            "connect", "web01", "--no-proxy", "--port", "3391", "--password", "hunter2", "--json",
        ],
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["address"], "10.0.0.5");
    assert_eq!(json["port"], "3391");
    assert_eq!(json["password"], "REMOVED");
}

#[test]
fn test_connect_show_password() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(
        temp_dir.path(),
        &["connect", "web02", "--password", "hunter2", "--show-password", "--json"],
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["password"], "hunter2");
    assert_eq!(json["port"], "3390");
}

#[test]
fn test_connect_through_tunnel() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(temp_dir.path(), &["resolve", "db", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["address"], "localhost");
    assert_eq!(json["port"], "13389");
    assert_eq!(json["tunnel"]["name"], "bastion");
    assert_eq!(json["tunnel"]["server"], "203.0.113.10");
    assert_eq!(json["tunnel"]["remote_address"], "10.0.1.7");
    assert_eq!(json["tunnel"]["remote_port"], 3389);
    assert_eq!(json["settings"]["width"], 2560);
    assert_eq!(json["settings"]["scale"], 150);
}

#[test]
fn test_connect_plain_output() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(temp_dir.path(), &["connect", "db", "--height", "1600"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Address:   localhost"), "got: {}", stdout);
    assert!(stdout.contains("Display:   2560x1600"), "got: {}", stdout);
    assert!(
        stdout.contains("ssh -i ~/.ssh/bastion.pem -N -L 13389:10.0.1.7:3389 ec2-user@203.0.113.10"),
        "got: {}",
        stdout
    );
}

#[test]
fn test_connect_host_name_ignores_case() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(temp_dir.path(), &["connect", "WEB02", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["host"], "web02");
}

#[test]
fn test_connect_unknown_host_suggests() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_runrdp(temp_dir.path(), &["connect", "web"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Host 'web' not found"), "got: {}", stderr);
    assert!(
        stderr.contains("Did you mean: web01, web02?"),
        "got: {}",
        stderr
    );
}

#[test]
fn test_find_ranks_matches() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(temp_dir.path(), &["find", "wb"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1. web01\n2. web02\n"), "got: {}", stderr);
    assert!(stderr.contains("No host was chosen."), "got: {}", stderr);
    assert!(output.stdout.is_empty());

    let output = run_success(temp_dir.path(), &["find", "", "-c", "1"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1. db\n"), "got: {}", stderr);
    assert!(!stderr.contains("2. "), "got: {}", stderr);

    let output = run_success(temp_dir.path(), &["find", "zz"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "No hosts match 'zz'.");
}

#[test]
fn test_find_connects_to_picked_host() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_with_input(temp_dir.path(), &["find", "wb"], "2\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Host:      web02"), "got: {}", stdout);
    assert!(stdout.contains("Address:   10.0.0.6"), "got: {}", stdout);
    assert!(stdout.contains("Port:      3390"), "got: {}", stdout);

    let output = run_with_input(temp_dir.path(), &["find", "wb"], "3\n");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No host was chosen."));
}

#[test]
fn test_connect_reads_mixed_case_config() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("Mixed.toml"),
        "[Host.Basic.AppServer]\nAddress = \"10.9.9.9\"\nUserName = \"Ops\"\n",
    )
    .expect("Failed to write Mixed.toml");

    let output = run_success(temp_dir.path(), &["connect", "AppServer", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["host"], "appserver");
    assert_eq!(json["address"], "10.9.9.9");
    assert_eq!(json["username"], "Ops");
}

#[test]
fn test_connect_rejects_invalid_display_override() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_runrdp(temp_dir.path(), &["connect", "web02", "--width", "100"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("width value 100 is invalid"), "got: {}", stderr);
}

#[test]
fn test_hosts_json() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_config(temp_dir.path());

    let output = run_success(temp_dir.path(), &["hosts", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let hosts = json.as_array().expect("hosts --json should print an array");

    let names: Vec<&str> = hosts.iter().map(|h| h["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["db", "jump", "web01", "web02"]);
    assert_eq!(hosts[2]["proxy"], "jump");
    assert_eq!(hosts[2]["kind"], "basic");
}

#[test]
fn test_empty_config_dir() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("absent");

    let output = run_success(&missing, &["hosts"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No hosts configured."));
}
