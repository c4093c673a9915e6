//! `frm context` command - pre-meeting summary of one contact

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::contact::{metadata, ContactRecord};
use frm_core::context::{collect_context, ContextProvider};
use frm_core::due::{DueEngine, DueStatus};
use frm_core::duration::DATE_FORMAT;
use frm_core::error::Result;
use frm_core::ledger::{Ledger, LogEntry};

/// Everything known locally about one contact
#[derive(Debug, Serialize)]
struct ContactSummary {
    name: String,
    ignored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snooze_until: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_contact: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_since: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_until_due: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    providers: Vec<String>,
    #[serde(skip)]
    status: Option<DueStatus>,
}

impl ContactSummary {
    fn build(record: &ContactRecord, history: &[LogEntry], engine: &DueEngine) -> Self {
        let last = history.iter().max_by_key(|e| e.time);
        let report = engine.evaluate(record);
        Self {
            name: record.display_name().to_string(),
            ignored: metadata::is_ignored(&record.card),
            frequency: metadata::frequency(&record.card).map(str::to_string),
            group: metadata::group(&record.card).map(str::to_string),
            snooze_until: metadata::snooze_until(&record.card),
            last_contact: last.map(|e| e.time),
            last_note: last.and_then(|e| e.note.clone()),
            days_since: last.map(|e| (engine.now() - e.time).num_days()),
            days_until_due: report.as_ref().map(|r| r.status.due_in_days()),
            providers: Vec::new(),
            status: report.map(|r| r.status),
        }
    }

    fn render(&self) -> Vec<String> {
        let mut lines = vec![format!("Name:      {}", self.name)];
        if self.ignored {
            lines.push("Status:    ignored".to_string());
        }
        if let Some(group) = &self.group {
            lines.push(format!("Group:     {group}"));
        }
        match &self.frequency {
            Some(frequency) => lines.push(format!("Frequency: every {frequency}")),
            None => lines.push("Frequency: not tracked".to_string()),
        }
        match (self.last_contact, self.days_since) {
            (Some(last), Some(days)) => {
                lines.push(format!(
                    "Last seen: {} ({days} days ago)",
                    last.format(DATE_FORMAT)
                ));
                if let Some(note) = &self.last_note {
                    lines.push(format!("Last note: {note}"));
                }
            }
            _ => lines.push("Last seen: never".to_string()),
        }
        match self.status {
            Some(DueStatus::Snoozed { until, .. }) => {
                lines.push(format!("Snoozed:   until {}", until.format(DATE_FORMAT)));
            }
            Some(DueStatus::NeverContacted) => {
                lines.push("Status:    overdue (never contacted)".to_string());
            }
            Some(DueStatus::Scheduled { due_in_days, .. }) if due_in_days < 0 => {
                lines.push(format!("Status:    overdue by {} days", -due_in_days));
            }
            Some(DueStatus::Scheduled { due_in_days, .. }) => {
                lines.push(format!("Due in:    {due_in_days} days"));
            }
            None => {}
        }
        if !self.providers.is_empty() {
            lines.push(String::new());
            lines.extend(self.providers.iter().cloned());
        }
        lines
    }
}

pub fn execute(
    cli: &Cli,
    aggregator: &Aggregator,
    ledger: &Ledger,
    engine: &DueEngine,
    providers: &[Box<dyn ContextProvider>],
    name: &str,
) -> Result<()> {
    let found = aggregator.resolve_contact(name)?;
    let record = &found.record;
    let history = ledger.history_for(record.display_name(), Some(&record.path))?;

    let mut summary = ContactSummary::build(record, &history, engine);
    summary.providers = collect_context(providers, record);

    if is_json(cli) {
        return print_json(&summary);
    }
    for line in summary.render() {
        println!("{line}");
    }
    Ok(())
}
