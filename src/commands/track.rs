//! `frm track` / `frm untrack` commands
//!
//! Both apply to every copy of the contact across accounts.

use crate::cli::Cli;
use crate::commands::format::{accounts_suffix, report_update, UpdateReport};
use frm_core::aggregator::Aggregator;
use frm_core::contact::metadata;
use frm_core::error::Result;

pub fn execute_track(cli: &Cli, aggregator: &Aggregator, name: &str, every: &str) -> Result<()> {
    let mut matches = aggregator.resolve_all_matches(name)?;
    let updated = aggregator.update_matches(&mut matches, |card| {
        if metadata::frequency(card) == Some(every) {
            return false;
        }
        metadata::set_frequency(card, every);
        true
    })?;

    let display = matches[0].display_name();
    report_update(
        cli,
        &UpdateReport {
            name: display,
            action: "track",
            updated,
            value: Some(every.to_string()),
        },
        &format!("Tracking {display} every {every}{}", accounts_suffix(updated)),
    )
}

pub fn execute_untrack(cli: &Cli, aggregator: &Aggregator, name: &str) -> Result<()> {
    let mut matches = aggregator.resolve_all_matches(name)?;
    let updated = aggregator.update_matches(&mut matches, metadata::remove_frequency)?;

    let display = matches[0].display_name();
    let message = if updated == 0 {
        format!("{display} is not tracked")
    } else {
        format!("Stopped tracking {display}{}", accounts_suffix(updated))
    };
    report_update(
        cli,
        &UpdateReport {
            name: display,
            action: "untrack",
            updated,
            value: None,
        },
        &message,
    )
}
