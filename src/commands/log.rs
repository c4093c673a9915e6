//! `frm log` command - append an interaction to the ledger

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::error::Result;
use frm_core::ledger::{Ledger, LogEntry};

/// When the contact resolves, the entry carries its stable path and
/// canonical display name. An unresolvable name is logged as typed.
pub fn execute(
    cli: &Cli,
    aggregator: Option<&Aggregator>,
    ledger: &Ledger,
    name: &str,
    note: Option<String>,
    time: DateTime<Utc>,
) -> Result<()> {
    let resolved = aggregator.and_then(|agg| match agg.resolve_contact(name) {
        Ok(found) => Some((found.display_name().to_string(), found.record.path)),
        Err(e) => {
            debug!(contact = name, error = %e, "logging unresolved contact");
            None
        }
    });

    let entry = match resolved {
        Some((display, path)) => LogEntry::new(display, time).with_path(path),
        None => LogEntry::new(name, time),
    }
    .with_note(note);

    ledger.append(&entry)?;

    if is_json(cli) {
        return print_json(&entry);
    }
    if !cli.quiet {
        println!("Logged interaction with {}", entry.contact);
    }
    Ok(())
}
