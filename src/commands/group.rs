//! `frm group` commands - assign, clear and list groups

use std::collections::BTreeMap;

use crate::cli::Cli;
use crate::commands::format::{accounts_suffix, is_json, print_json, report_update, UpdateReport};
use frm_core::aggregator::Aggregator;
use frm_core::contact::metadata;
use frm_core::error::Result;

pub fn execute_set(cli: &Cli, aggregator: &Aggregator, name: &str, group: &str) -> Result<()> {
    let mut matches = aggregator.resolve_all_matches(name)?;
    let updated = aggregator.update_matches(&mut matches, |card| {
        if metadata::group(card) == Some(group) {
            return false;
        }
        metadata::set_group(card, group);
        true
    })?;

    let display = matches[0].display_name();
    report_update(
        cli,
        &UpdateReport {
            name: display,
            action: "group-set",
            updated,
            value: Some(group.to_string()),
        },
        &format!("Set {display} group to {group}{}", accounts_suffix(updated)),
    )
}

pub fn execute_unset(cli: &Cli, aggregator: &Aggregator, name: &str) -> Result<()> {
    let mut matches = aggregator.resolve_all_matches(name)?;
    let updated = aggregator.update_matches(&mut matches, metadata::remove_group)?;

    let display = matches[0].display_name();
    let message = if updated == 0 {
        format!("{display} has no group")
    } else {
        format!("Removed group from {display}{}", accounts_suffix(updated))
    };
    report_update(
        cli,
        &UpdateReport {
            name: display,
            action: "group-unset",
            updated,
            value: None,
        },
        &message,
    )
}

/// Without a group: every group with its member count. With one: the
/// members of that group, matched case-insensitively.
pub fn execute_list(cli: &Cli, aggregator: &Aggregator, group: Option<&str>) -> Result<()> {
    let pool = aggregator.pool_all()?;

    if let Some(wanted) = group {
        let wanted_lower = wanted.to_lowercase();
        let mut names: Vec<&str> = pool
            .named()
            .filter(|(_, r)| {
                metadata::group(&r.card).is_some_and(|g| g.to_lowercase() == wanted_lower)
            })
            .map(|(_, r)| r.display_name())
            .collect();
        names.sort_unstable();

        if is_json(cli) {
            return print_json(&names);
        }
        for name in &names {
            println!("{name}");
        }
        if names.is_empty() {
            println!("No contacts in group {wanted:?}");
        }
        return Ok(());
    }

    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, record) in pool.iter() {
        if let Some(g) = metadata::group(&record.card) {
            *groups.entry(g).or_default() += 1;
        }
    }

    if is_json(cli) {
        return print_json(&groups);
    }
    for (name, count) in &groups {
        println!("  {name} ({count})");
    }
    if groups.is_empty() {
        println!("No groups defined");
    }
    Ok(())
}
