//! `frm add` command - create a contact in the first account

use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::contact::NewContact;
use frm_core::error::{FrmError, Result};

pub fn execute(cli: &Cli, aggregator: &Aggregator, contact: NewContact) -> Result<()> {
    if contact.name.trim().is_empty() {
        return Err(FrmError::UsageError("contact name must not be empty".to_string()));
    }
    let name = contact.name.clone();
    let created = aggregator.create_contact(contact.into_card())?;

    if is_json(cli) {
        return print_json(&json!({
            "name": name,
            "account": created.account.name(),
            "path": created.record.path,
        }));
    }
    if !cli.quiet {
        println!("Added contact {name}");
    }
    Ok(())
}
