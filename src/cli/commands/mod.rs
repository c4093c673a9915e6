//! Main CLI commands enum

use clap::Subcommand;

pub mod contact;
pub mod meta;

use contact::*;
use meta::*;

/// Top-level frm commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every contact across all accounts
    Contacts,

    /// Add a new contact to the first account
    Add(AddArgs),

    /// Set contact frequency (e.g. --every 2w)
    Track(TrackArgs),

    /// Stop tracking contact frequency
    Untrack(NameArgs),

    /// Log an interaction with a contact
    Log(LogArgs),

    /// Show interaction log for a contact
    History(NameArgs),

    /// Show overdue contacts
    Check,

    /// List tracked contacts (use --all for everyone)
    List(ListArgs),

    /// Show contact tracking dashboard
    Stats,

    /// Manage contact groups
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },

    /// Exclude a contact from tracking and triage
    Ignore(NameArgs),

    /// Stop ignoring a contact
    Unignore(NameArgs),

    /// Snooze a contact until a future date
    #[command(
        long_about = "Suppress a contact from check until a given date. Use --until with an \
                      absolute date (2026-04-01) or a duration from now (2m, 6w)."
    )]
    Snooze(SnoozeArgs),

    /// Remove snooze from a contact
    Unsnooze(NameArgs),

    /// Spread never-contacted people across their frequency interval
    #[command(long_about = "After a big import every tracked contact is overdue at once. \
                            This snoozes never-contacted contacts to random dates inside their \
                            own frequency window so they come due gradually. Dry run unless \
                            --apply is given.")]
    Spread(SpreadArgs),

    /// Pre-meeting prep: show contact summary
    #[command(visible_aliases = ["show", "detail"])]
    Context(NameArgs),

    /// Walk through untracked contacts and assign frequencies
    Triage(TriageArgs),
}
