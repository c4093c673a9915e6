//! `frm contacts` command - every contact name across all accounts

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::error::Result;

pub fn execute(cli: &Cli, aggregator: &Aggregator) -> Result<()> {
    let pool = aggregator.pool_all()?;
    let mut names: Vec<&str> = pool.named().map(|(_, r)| r.display_name()).collect();
    names.sort_unstable();

    if is_json(cli) {
        return print_json(&names);
    }

    for name in &names {
        println!("{name}");
    }
    if names.is_empty() && !cli.quiet {
        eprintln!("No contacts found.");
    }
    Ok(())
}
