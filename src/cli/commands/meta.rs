//! Argument structures for grouping, snoozing and scheduling commands

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Assign a contact to a group (e.g. close-friends, professional, family)
    Set {
        /// Contact display name (case-insensitive)
        name: String,
        /// Group label
        group: String,
    },

    /// Remove a contact from its group
    Unset {
        /// Contact display name (case-insensitive)
        name: String,
    },

    /// List groups, or the contacts in one group
    List {
        /// Group to list (case-insensitive)
        group: Option<String>,
    },
}

/// Arguments for the snooze command.
#[derive(Args, Debug)]
pub struct SnoozeArgs {
    /// Contact display name (case-insensitive)
    pub name: String,

    /// Date to snooze until (e.g. 2026-04-01 or 2m)
    #[arg(long)]
    pub until: String,
}

/// Arguments for the spread command.
#[derive(Args, Debug)]
pub struct SpreadArgs {
    /// Actually apply the snoozes (default is dry run)
    #[arg(long)]
    pub apply: bool,
}

/// Arguments for the triage command.
#[derive(Args, Debug)]
pub struct TriageArgs {
    /// Max contacts to show (-1 for unlimited)
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub limit: i64,
}
