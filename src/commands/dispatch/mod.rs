//! Command dispatch logic for frm

use std::time::Instant;

use crate::cli::Cli;
use frm_core::config;
use frm_core::error::Result;
use tracing::debug;

mod command;
mod commands;
mod macros;

pub(crate) use macros::trace_command;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => config::config_dir()?,
    };

    debug!(elapsed = ?start.elapsed(), config_dir = %config_dir.display(), "resolve_config_dir");

    let ctx = CommandContext::new(cli, config_dir, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
