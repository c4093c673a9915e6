use crate::support::{stdout_json, Fixture};
use predicates::prelude::*;

// ============================================================================
// triage
// ============================================================================

fn untriaged() -> Fixture {
    let fx = Fixture::new();
    fx.card(
        "personal",
        "alice.vcf",
        "Alice",
        &["EMAIL:alice@example.com", "ORG:Acme;"],
    )
    .card("personal", "bob.vcf", "Bob", &["TEL:+15551234"])
    .card("personal", "carol.vcf", "Carol", &[])
    .card("personal", "dave.vcf", "Dave", &["X-FRM-FREQUENCY:1w"])
    .card("personal", "erin.vcf", "Erin", &["X-FRM-IGNORE:true"]);
    fx
}

#[test]
fn test_triage_applies_choices() {
    let fx = untriaged();

    fx.cmd()
        .arg("triage")
        .write_stdin("m\ni\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice\n  alice@example.com\n  Acme\n"))
        .stdout(predicate::str::contains("Bob\n  +15551234\n"))
        .stdout(predicate::str::contains("[m]onthly  [q]uarterly  [y]early"))
        .stdout(predicate::str::contains("Dave").not())
        .stdout(predicate::str::contains("Erin").not())
        .stdout(predicate::str::contains(
            "Triaged 3 contacts: 1 monthly, 0 quarterly, 0 yearly, 1 skipped, 1 ignored",
        ));

    assert!(fx.read_card("personal", "alice.vcf").contains("X-FRM-FREQUENCY:1m"));
    assert!(fx.read_card("personal", "bob.vcf").contains("X-FRM-IGNORE:true"));
    let carol = fx.read_card("personal", "carol.vcf");
    assert!(!carol.contains("X-FRM-FREQUENCY"));
    assert!(!carol.contains("X-FRM-IGNORE"));
}

#[test]
fn test_triage_limit() {
    let fx = untriaged();

    fx.cmd()
        .args(["triage", "--limit", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob").not())
        .stdout(predicate::str::contains(
            "Triaged 1 contacts: 0 monthly, 0 quarterly, 1 yearly, 0 skipped, 0 ignored",
        ));
    assert!(fx.read_card("personal", "alice.vcf").contains("X-FRM-FREQUENCY:12m"));
}

#[test]
fn test_triage_end_of_input_skips() {
    let fx = untriaged();

    fx.cmd()
        .args(["triage", "--limit", "-1"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Triaged 3 contacts: 0 monthly, 1 quarterly, 0 yearly, 2 skipped, 0 ignored",
        ));
}

#[test]
fn test_triage_json_lists_candidates_without_writing() {
    let fx = untriaged();

    let output = fx
        .cmd()
        .args(["--format", "json", "triage"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);
    assert_eq!(json[0]["email"], "alice@example.com");
    assert_eq!(json[0]["org"], "Acme");
    assert_eq!(json[1]["phone"], "+15551234");
    assert!(json[2].get("email").is_none());

    assert!(!fx.read_card("personal", "alice.vcf").contains("X-FRM"));
}
