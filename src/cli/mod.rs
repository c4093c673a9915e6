//! CLI argument parsing for frm
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json,
//! --config-dir

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

pub use commands::meta::GroupCommands;
pub use commands::Commands;
pub use output::OutputFormat;

/// frm - keep in touch with the people who matter
#[derive(Parser, Debug)]
#[command(name = "frm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. debug, frm_core=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Directory holding config.toml and the interaction log
    #[arg(long, global = true, env = "FRM_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
