//! Integration tests for the frm CLI
//!
//! Every test runs the binary against a temp config dir with vdir accounts.

mod cli;
mod support;

use predicates::prelude::*;
use support::{frm, Fixture};

#[test]
fn test_help_flag() {
    frm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: frm"))
        .stdout(predicate::str::contains("track"))
        .stdout(predicate::str::contains("spread"))
        .stdout(predicate::str::contains("triage"));
}

#[test]
fn test_version_flag() {
    frm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("frm"));
}

#[test]
fn test_no_command_prints_banner() {
    let fx = Fixture::new();
    fx.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("frm --help"));
}

#[test]
fn test_unknown_command_is_usage_error() {
    frm().arg("frobnicate").assert().code(2);
}

#[test]
fn test_missing_config_is_data_error() {
    let dir = tempfile::tempdir().unwrap();
    frm()
        .env("FRM_CONFIG_DIR", dir.path())
        .arg("contacts")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config"));
}

#[test]
fn test_config_dir_flag_overrides_env() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);
    let other = tempfile::tempdir().unwrap();

    frm()
        .env("FRM_CONFIG_DIR", other.path())
        .arg("--config-dir")
        .arg(fx.config_dir())
        .arg("contacts")
        .assert()
        .success()
        .stdout("Alice\n");
}

#[test]
fn test_not_found_json_error() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    let output = fx
        .cmd()
        .args(["--format", "json", "track", "Nobody", "--every", "1w"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["type"], "not_found");
}

#[test]
fn test_json_usage_error_from_clap() {
    let output = frm()
        .args(["--format", "json", "track", "Alice"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["type"], "usage_error");
}

#[test]
fn test_unavailable_account_fails_listing() {
    let fx = Fixture::with_accounts(&["personal", "work"]);
    fx.card("personal", "alice.vcf", "Alice", &[]);
    std::fs::remove_dir_all(fx.account_dir("work")).unwrap();

    fx.cmd()
        .arg("contacts")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("work"));
}
