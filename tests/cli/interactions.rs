use crate::support::{stdout_json, Fixture};
use predicates::prelude::*;

// ============================================================================
// log / history
// ============================================================================

#[test]
fn test_log_resolves_canonical_name_and_path() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice Smith", &[]);

    fx.cmd()
        .args(["log", "alice smith", "--note", "coffee"])
        .assert()
        .success()
        .stdout("Logged interaction with Alice Smith\n");

    let ledger = fx.ledger();
    let entry: serde_json::Value = serde_json::from_str(ledger.lines().next().unwrap()).unwrap();
    assert_eq!(entry["contact"], "Alice Smith");
    assert_eq!(entry["path"], "alice.vcf");
    assert_eq!(entry["note"], "coffee");
}

#[test]
fn test_log_unknown_contact_kept_as_typed() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["log", "Mystery Person"])
        .assert()
        .success()
        .stdout("Logged interaction with Mystery Person\n");

    let entry: serde_json::Value = serde_json::from_str(fx.ledger().trim()).unwrap();
    assert_eq!(entry["contact"], "Mystery Person");
    assert!(entry.get("path").is_none());
    assert!(entry.get("note").is_none());
}

#[test]
fn test_log_without_config_still_appends() {
    let dir = tempfile::tempdir().unwrap();
    crate::support::frm()
        .env("FRM_CONFIG_DIR", dir.path())
        .args(["log", "Alice"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(dir.path().join("log.jsonl"))
        .unwrap()
        .contains("\"Alice\""));
}

#[test]
fn test_log_rejects_bad_date() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["log", "Alice", "--date", "yesterday"])
        .assert()
        .code(2);
    assert!(fx.ledger().is_empty());
}

#[test]
fn test_history_lists_entries_in_order() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    fx.cmd()
        .args(["log", "Alice", "--date", "2024-05-01", "--note", "coffee"])
        .assert()
        .success();
    fx.cmd()
        .args(["log", "Alice", "--date", "2024-06-15"])
        .assert()
        .success();
    fx.cmd()
        .args(["log", "Bob", "--date", "2024-06-16"])
        .assert()
        .success();

    fx.cmd()
        .args(["history", "ALICE"])
        .assert()
        .success()
        .stdout("2024-05-01  coffee\n2024-06-15\n");
}

#[test]
fn test_history_empty() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["history", "Alice"])
        .assert()
        .success()
        .stdout("No interactions logged for Alice\n");
}

#[test]
fn test_history_json() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);
    fx.cmd()
        .args(["log", "Alice", "--date", "2024-05-01"])
        .assert()
        .success();

    let output = fx
        .cmd()
        .args(["--format", "json", "history", "Alice"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["time"], "2024-05-01T00:00:00Z");
}

// ============================================================================
// check / list / stats
// ============================================================================

#[test]
fn test_check_reports_never_contacted_and_stale() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &["X-FRM-FREQUENCY:1w"])
        .card("personal", "bob.vcf", "Bob", &["X-FRM-FREQUENCY:2w"])
        .card("personal", "carol.vcf", "Carol", &[]);
    fx.cmd()
        .args(["log", "Alice", "--date", "2020-01-01"])
        .assert()
        .success();

    fx.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Overdue contacts:\n"))
        .stdout(predicate::str::contains("  Alice (every 1w, last contact "))
        .stdout(predicate::str::contains("  Bob (every 2w, never contacted)"))
        .stdout(predicate::str::contains("Carol").not());
}

#[test]
fn test_check_all_caught_up() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &["X-FRM-FREQUENCY:1w"]);
    fx.cmd().args(["log", "Alice"]).assert().success();

    fx.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout("All caught up! No overdue contacts.\n");
}

#[test]
fn test_check_ignores_ignored_and_invalid_frequency() {
    let fx = Fixture::new();
    fx.card(
        "personal",
        "alice.vcf",
        "Alice",
        &["X-FRM-FREQUENCY:1w", "X-FRM-IGNORE:true"],
    )
    .card("personal", "bob.vcf", "Bob", &["X-FRM-FREQUENCY:often"]);

    fx.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout("All caught up! No overdue contacts.\n");
}

#[test]
fn test_check_json() {
    let fx = Fixture::new();
    fx.card("personal", "bob.vcf", "Bob", &["X-FRM-FREQUENCY:2w", "X-FRM-GROUP:work"]);

    let output = fx.cmd().args(["--format", "json", "check"]).output().unwrap();
    let json = stdout_json(&output);
    assert_eq!(json[0]["name"], "Bob");
    assert_eq!(json[0]["frequency"], "2w");
    assert_eq!(json[0]["group"], "work");
    assert_eq!(json[0]["due_in_days"], 0);
    assert!(json[0].get("last_contact").is_none());
}

#[test]
fn test_list_tracked_contacts() {
    let fx = Fixture::new();
    fx.card(
        "personal",
        "alice.vcf",
        "Alice",
        &["X-FRM-FREQUENCY:1w", "X-FRM-GROUP:friends"],
    )
    .card("personal", "bob.vcf", "Bob", &["X-FRM-FREQUENCY:1w"])
    .card("personal", "carol.vcf", "Carol", &["X-FRM-FREQUENCY:1w"])
    .card("personal", "dave.vcf", "Dave", &[]);
    fx.cmd().args(["log", "Alice"]).assert().success();
    fx.cmd()
        .args(["log", "Carol", "--date", "2020-01-01"])
        .assert()
        .success();

    let stdout = String::from_utf8(fx.cmd().arg("list").output().unwrap().stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Alice (every 1w) [friends] — due in 6d");
    assert_eq!(lines[1], "Bob (every 1w) — due now");
    assert!(lines[2].starts_with("Carol (every 1w) — overdue by "));
}

#[test]
fn test_list_all_includes_untracked() {
    let fx = Fixture::new();
    fx.card("personal", "dave.vcf", "Dave", &[]);

    fx.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout("No tracked contacts. Use 'frm track' to start tracking someone.\n");
    fx.cmd()
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout("Dave\n");
}

#[test]
fn test_list_json_shows_snooze_countdown() {
    let fx = Fixture::new();
    fx.card(
        "personal",
        "alice.vcf",
        "Alice",
        &["X-FRM-FREQUENCY:1w", "X-FRM-SNOOZE-UNTIL:2099-01-01"],
    );

    let output = fx.cmd().args(["--format", "json", "list"]).output().unwrap();
    let json = stdout_json(&output);
    assert_eq!(json[0]["name"], "Alice");
    assert!(json[0]["due_in_days"].as_i64().unwrap() > 365);
}

#[test]
fn test_stats_dashboard() {
    let fx = Fixture::with_accounts(&["personal", "work"]);
    fx.card("personal", "alice.vcf", "Alice", &["X-FRM-FREQUENCY:1w"])
        .card("personal", "bob.vcf", "Bob", &["X-FRM-IGNORE:true"])
        .card("work", "carol.vcf", "Carol", &[])
        .card("work", "dave.vcf", "Dave", &["X-FRM-FREQUENCY:1m"]);
    for name in ["Alice", "Alice", "Carol"] {
        fx.cmd().args(["log", name]).assert().success();
    }

    let output = fx.cmd().args(["--format", "json", "stats"]).output().unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["total_contacts"], 4);
    assert_eq!(json["tracked"], 2);
    assert_eq!(json["ignored"], 1);
    assert_eq!(json["untracked"], 1);
    assert_eq!(json["overdue"], 1);
    assert_eq!(json["total_interactions"], 3);
    assert_eq!(json["most_contacted"]["name"], "Alice");
    assert_eq!(json["most_contacted"]["count"], 2);
    assert_eq!(json["least_contacted"]["name"], "Carol");

    fx.cmd()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total contacts:  4"))
        .stdout(predicate::str::contains("Most contacted:  Alice (2)"));
}

#[test]
fn test_stats_without_interactions_omits_most_least() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    let output = fx.cmd().args(["--format", "json", "stats"]).output().unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["total_interactions"], 0);
    assert!(json.get("most_contacted").is_none());
}
