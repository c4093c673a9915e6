//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::cli::Cli;
use frm_core::aggregator::Aggregator;
use frm_core::config::Config;
use frm_core::due::DueEngine;
use frm_core::error::Result;
use frm_core::ledger::Ledger;

use super::trace_command;

/// Shared context for command execution. Collaborators are built on demand
/// and handed to commands as explicit values.
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
    pub now: DateTime<Utc>,
    config_dir: PathBuf,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config_dir: PathBuf, start: Instant) -> Self {
        Self {
            cli,
            start,
            now: Utc::now(),
            config_dir,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config(&self) -> Result<Config> {
        let config = Config::load(&self.config_dir)?;
        trace_command!(self.cli, self.start, "load_config");
        Ok(config)
    }

    pub fn aggregator(&self, config: &Config) -> Result<Aggregator> {
        Aggregator::from_config(config)
    }

    /// Load config and build the aggregator in one step
    pub fn open_accounts(&self) -> Result<Aggregator> {
        self.aggregator(&self.config()?)
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::in_dir(&self.config_dir)
    }

    /// Due-date engine over the current ledger contents
    pub fn engine(&self, ledger: &Ledger) -> Result<DueEngine> {
        let index = ledger.last_contact_by_key()?;
        trace_command!(self.cli, self.start, "read_ledger");
        Ok(DueEngine::new(index, self.now))
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("frm {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Keep in touch with friends, family and colleagues.");
        println!();
        println!("Run `frm --help` for usage information.");
        Ok(())
    }
}
