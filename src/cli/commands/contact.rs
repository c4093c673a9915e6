//! Argument structures for contact and interaction commands

use clap::Args;

/// A single contact name
#[derive(Args, Debug)]
pub struct NameArgs {
    /// Contact display name (case-insensitive)
    pub name: String,
}

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Full name; the first word becomes the given name
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Organization
    #[arg(long)]
    pub org: Option<String>,

    /// Website or social URL
    #[arg(long)]
    pub url: Option<String>,
}

/// Arguments for the track command.
#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Contact display name (case-insensitive)
    pub name: String,

    /// Contact frequency (e.g. 2w, 1m, 3d)
    #[arg(long)]
    pub every: String,
}

/// Arguments for the log command.
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Contact display name (case-insensitive)
    pub name: String,

    /// Note about the interaction
    #[arg(long)]
    pub note: Option<String>,

    /// When it happened: YYYY-MM-DD or a duration ago like -2w (default: now)
    #[arg(long, allow_hyphen_values = true)]
    pub date: Option<String>,
}

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// List all contacts, not just tracked ones
    #[arg(long)]
    pub all: bool,
}
