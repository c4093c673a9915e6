//! `frm spread` command - stagger never-contacted tracked contacts
//!
//! After an import every tracked contact is overdue at once. Spreading
//! snoozes each one to a random date inside its own interval so they come
//! due gradually. Dry run unless `--apply` is given.

use rand::Rng;
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::due::DueEngine;
use frm_core::duration::DATE_FORMAT;
use frm_core::error::Result;
use frm_core::spread::{self, SpreadPlan};

#[derive(Debug, Serialize)]
struct SpreadEntry<'a> {
    name: &'a str,
    frequency: &'a str,
    snooze_until: String,
    due_in_days: i64,
}

#[derive(Debug, Serialize)]
struct SpreadOutput<'a> {
    applied: bool,
    contacts: Vec<SpreadEntry<'a>>,
}

pub fn execute<R: Rng>(
    cli: &Cli,
    aggregator: &Aggregator,
    engine: &DueEngine,
    apply: bool,
    rng: &mut R,
) -> Result<()> {
    let pool = aggregator.pool_all()?;
    let groups = spread::candidates(&pool, engine);
    let plan = spread::plan(groups, engine.now(), rng);

    if apply && !plan.is_empty() {
        spread::apply(aggregator, &plan)?;
    }

    if is_json(cli) {
        return print_json(&SpreadOutput {
            applied: apply,
            contacts: entries(&plan),
        });
    }
    for line in render(&plan, apply) {
        println!("{line}");
    }
    Ok(())
}

fn entries<'p>(plan: &'p SpreadPlan<'_>) -> Vec<SpreadEntry<'p>> {
    plan.groups
        .iter()
        .flat_map(|group| {
            group.snoozes.iter().map(move |s| SpreadEntry {
                name: s.candidate.name(),
                frequency: &group.frequency,
                snooze_until: s.snooze_until.format(DATE_FORMAT).to_string(),
                due_in_days: s.due_in_days,
            })
        })
        .collect()
}

fn render(plan: &SpreadPlan<'_>, apply: bool) -> Vec<String> {
    if plan.is_empty() {
        return vec!["No never-contacted tracked contacts to spread.".to_string()];
    }

    let mut lines = Vec::new();
    for group in &plan.groups {
        lines.push(format!(
            "{} ({} contacts, every {}):",
            group.frequency,
            group.snoozes.len(),
            group.frequency
        ));
        for snooze in &group.snoozes {
            let mut line = format!("  {} → due in {}d", snooze.candidate.name(), snooze.due_in_days);
            if apply {
                line.push_str(&format!(
                    " (snoozed until {})",
                    snooze.snooze_until.format(DATE_FORMAT)
                ));
            }
            lines.push(line);
        }
    }

    lines.push(String::new());
    if apply {
        lines.push(format!("Spread {} contacts across their intervals.", plan.len()));
    } else {
        lines.push(format!(
            "Dry run: would snooze {} contacts. Run with --apply to execute.",
            plan.len()
        ));
    }
    lines
}
