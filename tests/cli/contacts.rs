use crate::support::{stdout_json, Fixture};
use predicates::prelude::*;

// ============================================================================
// contacts / add
// ============================================================================

#[test]
fn test_contacts_sorted_across_accounts() {
    let fx = Fixture::with_accounts(&["personal", "work"]);
    fx.card("personal", "carol.vcf", "Carol", &[])
        .card("personal", "alice.vcf", "Alice", &[])
        .card("work", "bob.vcf", "Bob", &[]);

    fx.cmd()
        .arg("contacts")
        .assert()
        .success()
        .stdout("Alice\nBob\nCarol\n");
}

#[test]
fn test_contacts_empty() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("contacts")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No contacts found."));
}

#[test]
fn test_contacts_skips_unnamed_cards() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[])
        .card("personal", "blank.vcf", "", &[]);

    let output = fx.cmd().args(["--format", "json", "contacts"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!(["Alice"]));
}

#[test]
fn test_add_creates_card_in_first_account() {
    let fx = Fixture::with_accounts(&["personal", "work"]);

    fx.cmd()
        .args([
            "add",
            "Fox Mulder",
            "--email",
            "fox@example.com",
            "--org",
            "FBI",
        ])
        .assert()
        .success()
        .stdout("Added contact Fox Mulder\n");

    let files: Vec<_> = std::fs::read_dir(fx.account_dir("personal"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let text = std::fs::read_to_string(&files[0]).unwrap();
    assert!(text.contains("FN:Fox Mulder"));
    assert!(text.contains("N:Mulder;Fox;;;"));
    assert!(text.contains("EMAIL:fox@example.com"));
    assert!(text.contains("ORG:FBI"));
    assert_eq!(std::fs::read_dir(fx.account_dir("work")).unwrap().count(), 0);

    fx.cmd()
        .arg("contacts")
        .assert()
        .success()
        .stdout("Fox Mulder\n");
}

#[test]
fn test_add_json_reports_account() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["--format", "json", "add", "Dana Scully"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["name"], "Dana Scully");
    assert_eq!(json["account"], "personal");
    assert!(json["path"].as_str().unwrap().ends_with(".vcf"));
}

// ============================================================================
// context
// ============================================================================

#[test]
fn test_context_untracked_contact() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);

    fx.cmd()
        .args(["context", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:      Alice"))
        .stdout(predicate::str::contains("Frequency: not tracked"))
        .stdout(predicate::str::contains("Last seen: never"));
}

#[test]
fn test_context_aliases() {
    let fx = Fixture::new();
    fx.card(
        "personal",
        "alice.vcf",
        "Alice",
        &["X-FRM-FREQUENCY:2w", "X-FRM-GROUP:friends"],
    );

    for alias in ["show", "detail"] {
        fx.cmd()
            .args([alias, "Alice"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Group:     friends"))
            .stdout(predicate::str::contains("Frequency: every 2w"))
            .stdout(predicate::str::contains("Status:    overdue (never contacted)"));
    }
}

#[test]
fn test_context_json_after_log() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &["X-FRM-FREQUENCY:2w"]);
    fx.cmd()
        .args(["log", "Alice", "--note", "lunch"])
        .assert()
        .success();

    let output = fx
        .cmd()
        .args(["--format", "json", "context", "Alice"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["name"], "Alice");
    assert_eq!(json["ignored"], false);
    assert_eq!(json["frequency"], "2w");
    assert_eq!(json["last_note"], "lunch");
    assert_eq!(json["days_since"], 0);
    assert_eq!(json["days_until_due"], 13);
}

#[test]
fn test_context_unknown_contact() {
    let fx = Fixture::new();
    fx.card("personal", "alice.vcf", "Alice", &[]);
    fx.cmd().args(["context", "Zed"]).assert().code(3);
}
