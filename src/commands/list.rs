//! `frm list` command - tracked contacts and when they come due

use serde::Serialize;

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::contact::metadata;
use frm_core::due::DueEngine;
use frm_core::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ListEntry {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_in_days: Option<i64>,
}

impl ListEntry {
    fn render(&self) -> String {
        let mut line = self.name.clone();
        if let Some(frequency) = &self.frequency {
            line.push_str(&format!(" (every {frequency})"));
        }
        if let Some(group) = &self.group {
            line.push_str(&format!(" [{group}]"));
        }
        match self.due_in_days {
            Some(days) if days < 0 => line.push_str(&format!(" — overdue by {}d", -days)),
            Some(0) => line.push_str(" — due now"),
            Some(days) => line.push_str(&format!(" — due in {days}d")),
            None => {}
        }
        line
    }
}

/// Without `all`, only contacts with a frequency that are not ignored
pub fn execute(cli: &Cli, aggregator: &Aggregator, engine: &DueEngine, all: bool) -> Result<()> {
    let pool = aggregator.pool_all()?;

    let mut entries: Vec<ListEntry> = pool
        .named()
        .filter(|(_, r)| {
            all || (metadata::frequency(&r.card).is_some() && !metadata::is_ignored(&r.card))
        })
        .map(|(_, record)| ListEntry {
            name: record.display_name().to_string(),
            frequency: metadata::frequency(&record.card).map(str::to_string),
            group: metadata::group(&record.card).map(str::to_string),
            due_in_days: engine.evaluate(record).map(|r| r.status.due_in_days()),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    if is_json(cli) {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No tracked contacts. Use 'frm track' to start tracking someone.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", entry.render());
    }
    Ok(())
}
