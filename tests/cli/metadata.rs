use crate::support::{stdout_json, Fixture};
use predicates::prelude::*;

// ============================================================================
// track / untrack
// ============================================================================

#[test]
fn test_track_updates_every_account() {
    let fx = Fixture::with_accounts(&["personal", "work"]);
    fx.card("personal", "alice.vcf", "Alice", &[])
        .card("work", "alice-w.vcf", "alice", &[])
        .card("work", "bob.vcf", "Bob", &[]);

    fx.cmd()
        .args(["track", "ALICE", "--every", "2w"])
        .assert()
        .success()
        .stdout("Tracking Alice every 2w (2 accounts)\n");

    assert!(fx.read_card("personal", "alice.vcf").contains("X-FRM-FREQUENCY:2w"));
    assert!(fx.read_card("work", "alice-w.vcf").contains("X-FRM-FREQUENCY:2w"));
    assert!(!fx.read_card("work", "bob.vcf").contains("X-FRM-FREQUENCY"));
}

#[test]
fn test_track_single_account_has_no_suffix() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    fx.cmd()
        .args(["track", "Alice", "--every", "1m"])
        .assert()
        .success()
        .stdout("Tracking Alice every 1m\n");
}

#[test]
fn test_track_rejects_invalid_interval() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    fx.cmd()
        .args(["track", "Alice", "--every", "2y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid duration"));
    assert!(!fx.read_card("personal", "alice.vcf").contains("X-FRM-FREQUENCY"));
}

#[test]
fn test_track_json_report() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    let output = fx
        .cmd()
        .args(["--format", "json", "track", "Alice", "--every", "3d"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["name"], "Alice");
    assert_eq!(json["action"], "track");
    assert_eq!(json["updated"], 1);
    assert_eq!(json["value"], "3d");
}

#[test]
fn test_untrack() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &["X-FRM-FREQUENCY:1w"]);

    fx.cmd()
        .args(["untrack", "Alice"])
        .assert()
        .success()
        .stdout("Stopped tracking Alice\n");
    assert!(!fx.read_card("personal", "alice.vcf").contains("X-FRM-FREQUENCY"));
}

#[test]
fn test_track_unknown_contact() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);
    fx.cmd()
        .args(["track", "Zed", "--every", "1w"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("hint: run 'frm contacts'"));
}

// ============================================================================
// ignore / unignore
// ============================================================================

#[test]
fn test_ignore_then_unignore() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    fx.cmd()
        .args(["ignore", "Alice"])
        .assert()
        .success()
        .stdout("Ignored Alice\n");
    assert!(fx.read_card("personal", "alice.vcf").contains("X-FRM-IGNORE:true"));

    fx.cmd()
        .args(["ignore", "Alice"])
        .assert()
        .success()
        .stdout("Alice is already ignored\n");

    fx.cmd()
        .args(["unignore", "Alice"])
        .assert()
        .success()
        .stdout("Unignored Alice\n");
    assert!(!fx.read_card("personal", "alice.vcf").contains("X-FRM-IGNORE"));

    fx.cmd()
        .args(["unignore", "Alice"])
        .assert()
        .success()
        .stdout("Alice is not ignored\n");
}

#[test]
fn test_ignore_only_writes_changed_copies() {
    let fx = Fixture::with_accounts(&["personal", "work"]);
    fx.card("personal", "alice.vcf", "Alice", &["X-FRM-IGNORE:true"])
        .card("work", "alice.vcf", "Alice", &[]);

    fx.cmd()
        .args(["ignore", "Alice"])
        .assert()
        .success()
        .stdout("Ignored Alice\n");
    assert!(fx.read_card("work", "alice.vcf").contains("X-FRM-IGNORE:true"));
}

// ============================================================================
// group
// ============================================================================

#[test]
fn test_group_set_list_unset() {
    let fx = Fixture::with_accounts(&["personal", "work"]);
    fx.card("personal", "alice.vcf", "Alice", &[])
        .card("work", "alice.vcf", "Alice", &[])
        .card("personal", "bob.vcf", "Bob", &[]);

    fx.cmd()
        .args(["group", "set", "Alice", "close-friends"])
        .assert()
        .success()
        .stdout("Set Alice group to close-friends (2 accounts)\n");
    fx.cmd()
        .args(["group", "set", "Bob", "family"])
        .assert()
        .success();

    fx.cmd()
        .args(["group", "list"])
        .assert()
        .success()
        .stdout("  close-friends (2)\n  family (1)\n");

    fx.cmd()
        .args(["group", "list", "FAMILY"])
        .assert()
        .success()
        .stdout("Bob\n");

    fx.cmd()
        .args(["group", "unset", "Bob"])
        .assert()
        .success()
        .stdout("Removed group from Bob\n");

    fx.cmd()
        .args(["group", "list", "family"])
        .assert()
        .success()
        .stdout("No contacts in group \"family\"\n");
}

#[test]
fn test_group_list_empty() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);
    fx.cmd()
        .args(["group", "list"])
        .assert()
        .success()
        .stdout("No groups defined\n");
}

// ============================================================================
// snooze / unsnooze
// ============================================================================

#[test]
fn test_snooze_until_date_hides_from_check() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &["X-FRM-FREQUENCY:1w"]);

    fx.cmd()
        .args(["snooze", "Alice", "--until", "2099-06-01"])
        .assert()
        .success()
        .stdout("Snoozed Alice until 2099-06-01\n");
    assert!(fx
        .read_card("personal", "alice.vcf")
        .contains("X-FRM-SNOOZE-UNTIL:2099-06-01"));

    fx.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout("All caught up! No overdue contacts.\n");

    fx.cmd()
        .args(["unsnooze", "Alice"])
        .assert()
        .success()
        .stdout("Unsnoozed Alice\n");
    fx.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice (every 1w, never contacted)"));
}

#[test]
fn test_snooze_relative_duration() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    let output = fx
        .cmd()
        .args(["--format", "json", "snooze", "Alice", "--until", "2w"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["action"], "snooze");
    let date = json["value"].as_str().unwrap().to_string();
    assert_eq!(date.len(), 10);
    assert!(fx
        .read_card("personal", "alice.vcf")
        .contains(&format!("X-FRM-SNOOZE-UNTIL:{date}")));
}

#[test]
fn test_snooze_rejects_garbage() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);
    fx.cmd()
        .args(["snooze", "Alice", "--until", "someday"])
        .assert()
        .code(2);
}

#[test]
fn test_unsnooze_not_snoozed() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);
    fx.cmd()
        .args(["unsnooze", "Alice"])
        .assert()
        .success()
        .stdout("Alice is not snoozed\n");
}
