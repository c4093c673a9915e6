//! `frm snooze` / `frm unsnooze` commands

use chrono::NaiveDate;

use crate::cli::Cli;
use crate::commands::format::{accounts_suffix, report_update, UpdateReport};
use frm_core::aggregator::Aggregator;
use frm_core::contact::metadata;
use frm_core::duration::DATE_FORMAT;
use frm_core::error::Result;

pub fn execute_snooze(cli: &Cli, aggregator: &Aggregator, name: &str, until: NaiveDate) -> Result<()> {
    let mut matches = aggregator.resolve_all_matches(name)?;
    let updated = aggregator.update_matches(&mut matches, |card| {
        metadata::set_snooze_until(card, until);
        true
    })?;

    let display = matches[0].display_name();
    let date = until.format(DATE_FORMAT).to_string();
    report_update(
        cli,
        &UpdateReport {
            name: display,
            action: "snooze",
            updated,
            value: Some(date.clone()),
        },
        &format!("Snoozed {display} until {date}{}", accounts_suffix(updated)),
    )
}

pub fn execute_unsnooze(cli: &Cli, aggregator: &Aggregator, name: &str) -> Result<()> {
    let mut matches = aggregator.resolve_all_matches(name)?;
    let updated = aggregator.update_matches(&mut matches, metadata::remove_snooze_until)?;

    let display = matches[0].display_name();
    let message = if updated == 0 {
        format!("{display} is not snoozed")
    } else {
        format!("Unsnoozed {display}{}", accounts_suffix(updated))
    };
    report_update(
        cli,
        &UpdateReport {
            name: display,
            action: "unsnooze",
            updated,
            value: None,
        },
        &message,
    )
}
