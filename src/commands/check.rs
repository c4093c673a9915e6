//! `frm check` command - overdue tracked contacts

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::due::{DueEngine, DueReport};
use frm_core::duration::format_ago;
use frm_core::error::Result;

#[derive(Debug, Serialize)]
struct OverdueEntry<'a> {
    name: &'a str,
    frequency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_contact: Option<DateTime<Utc>>,
    due_in_days: i64,
}

impl<'a> From<&'a DueReport> for OverdueEntry<'a> {
    fn from(report: &'a DueReport) -> Self {
        Self {
            name: &report.name,
            frequency: &report.frequency,
            group: report.group.as_deref(),
            last_contact: report.status.last_contact(),
            due_in_days: report.status.due_in_days(),
        }
    }
}

pub fn execute(cli: &Cli, aggregator: &Aggregator, engine: &DueEngine) -> Result<()> {
    let pool = aggregator.pool_all()?;
    let mut overdue = engine.overdue(pool.iter().map(|(_, r)| r));
    overdue.sort_by(|a, b| a.name.cmp(&b.name));

    if is_json(cli) {
        let entries: Vec<OverdueEntry<'_>> = overdue.iter().map(OverdueEntry::from).collect();
        return print_json(&entries);
    }

    if overdue.is_empty() {
        println!("All caught up! No overdue contacts.");
        return Ok(());
    }
    println!("Overdue contacts:");
    for report in &overdue {
        println!("{}", describe(report, engine.now()));
    }
    Ok(())
}

fn describe(report: &DueReport, now: DateTime<Utc>) -> String {
    match report.status.last_contact() {
        Some(last) => format!(
            "  {} (every {}, last contact {} ago)",
            report.name,
            report.frequency,
            format_ago(now - last)
        ),
        None => format!("  {} (every {}, never contacted)", report.name, report.frequency),
    }
}
