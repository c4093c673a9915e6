use crate::support::{stdout_json, Fixture};
use predicates::prelude::*;

// ============================================================================
// spread
// ============================================================================

fn imported() -> Fixture {
    let fx = Fixture::new();
    fx.card("personal", "carol.vcf", "Carol", &["X-FRM-FREQUENCY:1m"])
        .card("personal", "dave.vcf", "Dave", &["X-FRM-FREQUENCY:1m"])
        .card("personal", "erin.vcf", "Erin", &["X-FRM-FREQUENCY:1w"])
        .card("personal", "frank.vcf", "Frank", &["X-FRM-FREQUENCY:1w"])
        .card("personal", "gina.vcf", "Gina", &[]);
    fx
}

#[test]
fn test_spread_dry_run_leaves_cards_untouched() {
    let fx = imported();
    fx.cmd()
        .args(["log", "Frank", "--date", "2024-01-01"])
        .assert()
        .success();

    fx.cmd()
        .arg("spread")
        .assert()
        .success()
        .stdout(predicate::str::contains("1m (2 contacts, every 1m):"))
        .stdout(predicate::str::contains("1w (1 contacts, every 1w):"))
        .stdout(predicate::str::contains("  Carol → due in "))
        .stdout(predicate::str::contains("Frank").not())
        .stdout(predicate::str::contains("Gina").not())
        .stdout(predicate::str::contains(
            "Dry run: would snooze 3 contacts. Run with --apply to execute.",
        ));

    for file in ["carol.vcf", "dave.vcf", "erin.vcf"] {
        assert!(!fx.read_card("personal", file).contains("X-FRM-SNOOZE-UNTIL"));
    }
}

#[test]
fn test_spread_apply_snoozes_within_interval() {
    let fx = imported();

    let output = fx
        .cmd()
        .args(["--format", "json", "spread", "--apply"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["applied"], true);
    let contacts = json["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 4);

    for entry in contacts {
        let days = entry["due_in_days"].as_i64().unwrap();
        let limit = if entry["frequency"] == "1w" { 7 } else { 30 };
        assert!((0..=limit).contains(&days), "{entry}");
        let file = format!("{}.vcf", entry["name"].as_str().unwrap().to_lowercase());
        let until = entry["snooze_until"].as_str().unwrap();
        assert!(fx
            .read_card("personal", &file)
            .contains(&format!("X-FRM-SNOOZE-UNTIL:{until}")));
    }

    fx.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout("All caught up! No overdue contacts.\n");

    fx.cmd()
        .arg("spread")
        .assert()
        .success()
        .stdout("No never-contacted tracked contacts to spread.\n");
}

#[test]
fn test_spread_apply_human_output() {
    let fx = Fixture::new();
    fx.card("personal", "carol.vcf", "Carol", &["X-FRM-FREQUENCY:2w"]);

    fx.cmd()
        .args(["spread", "--apply"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(snoozed until "))
        .stdout(predicate::str::contains("Spread 1 contacts across their intervals."));
}

#[test]
fn test_spread_nothing_to_do() {
    let fx = Fixture::new();
    fx.card("personal", "gina.vcf", "Gina", &[]);
    fx.cmd()
        .arg("spread")
        .assert()
        .success()
        .stdout("No never-contacted tracked contacts to spread.\n");
}
