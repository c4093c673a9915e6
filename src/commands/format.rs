//! Shared output helpers

use serde::Serialize;

use crate::cli::{Cli, OutputFormat};
use frm_core::error::Result;

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn is_json(cli: &Cli) -> bool {
    cli.format == OutputFormat::Json
}

/// `" (N accounts)"` when more than one copy changed
pub fn accounts_suffix(count: usize) -> String {
    if count > 1 {
        format!(" ({count} accounts)")
    } else {
        String::new()
    }
}

/// Result of a write applied to every copy of a contact
#[derive(Debug, Serialize)]
pub struct UpdateReport<'a> {
    pub name: &'a str,
    pub action: &'a str,
    pub updated: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Emit an update report: JSON object, or the human message unless quiet
pub fn report_update(cli: &Cli, report: &UpdateReport<'_>, message: &str) -> Result<()> {
    if is_json(cli) {
        return print_json(report);
    }
    if !cli.quiet {
        println!("{message}");
    }
    Ok(())
}
