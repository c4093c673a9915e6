//! `frm ignore` / `frm unignore` commands

use crate::cli::Cli;
use crate::commands::format::{accounts_suffix, report_update, UpdateReport};
use frm_core::aggregator::Aggregator;
use frm_core::contact::metadata;
use frm_core::error::Result;

pub fn execute_ignore(cli: &Cli, aggregator: &Aggregator, name: &str) -> Result<()> {
    let mut matches = aggregator.resolve_all_matches(name)?;
    let updated = aggregator.update_matches(&mut matches, |card| {
        if metadata::is_ignored(card) {
            return false;
        }
        metadata::set_ignored(card);
        true
    })?;

    let display = matches[0].display_name();
    let message = if updated == 0 {
        format!("{display} is already ignored")
    } else {
        format!("Ignored {display}{}", accounts_suffix(updated))
    };
    report_update(
        cli,
        &UpdateReport {
            name: display,
            action: "ignore",
            updated,
            value: None,
        },
        &message,
    )
}

pub fn execute_unignore(cli: &Cli, aggregator: &Aggregator, name: &str) -> Result<()> {
    let mut matches = aggregator.resolve_all_matches(name)?;
    let updated = aggregator.update_matches(&mut matches, metadata::remove_ignored)?;

    let display = matches[0].display_name();
    let message = if updated == 0 {
        format!("{display} is not ignored")
    } else {
        format!("Unignored {display}{}", accounts_suffix(updated))
    };
    report_update(
        cli,
        &UpdateReport {
            name: display,
            action: "unignore",
            updated,
            value: None,
        },
        &message,
    )
}
