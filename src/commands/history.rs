//! `frm history` command

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::duration::DATE_FORMAT;
use frm_core::error::Result;
use frm_core::ledger::Ledger;

pub fn execute(cli: &Cli, aggregator: Option<&Aggregator>, ledger: &Ledger, name: &str) -> Result<()> {
    let path = aggregator
        .and_then(|agg| agg.resolve_contact(name).ok())
        .map(|found| found.record.path);
    let entries = ledger.history_for(name, path.as_deref())?;

    if is_json(cli) {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No interactions logged for {name}");
        return Ok(());
    }
    for entry in &entries {
        match &entry.note {
            Some(note) => println!("{}  {note}", entry.time.format(DATE_FORMAT)),
            None => println!("{}", entry.time.format(DATE_FORMAT)),
        }
    }
    Ok(())
}
