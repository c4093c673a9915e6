//! frm - friend relationship manager
//!
//! Keeps a contact cadence on top of one or more address books: track how
//! often you want to be in touch with someone, log real interactions, and see
//! who is overdue.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use frm_core::error::{ExitCode as FrmExitCode, FrmError};
use frm_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();
    let args: Vec<String> = env::args().skip(1).collect();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // clap fails before `Cli.format` exists, so JSON is detected from argv
        Err(err) if argv_requests_json(&args) => match usage_error(&err) {
            Some(error) => {
                eprintln!("{}", error.to_json());
                return exit_with(error.exit_code());
            }
            None => err.exit(),
        },
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => exit_with(FrmExitCode::Success),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else if !cli.quiet {
                eprintln!("error: {e}");
                if let Some(hint) = hint_for(&e) {
                    eprintln!("hint: {hint}");
                }
            }
            exit_with(e.exit_code())
        }
    }
}

fn exit_with(code: FrmExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

/// Map a clap failure to a frm error; `None` for help and version output
fn usage_error(err: &clap::Error) -> Option<FrmError> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::ArgumentConflict
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::TooManyValues
        | ErrorKind::WrongNumberOfValues => Some(FrmError::UsageError(err.to_string())),
        _ => Some(FrmError::Other(err.to_string())),
    }
}

/// Follow-up advice printed under a human-readable error
fn hint_for(error: &FrmError) -> Option<&'static str> {
    match error {
        FrmError::NotFound { .. } => Some("run 'frm contacts' to list known names"),
        FrmError::Config { .. } => {
            Some("create config.toml in the config directory or pass --config-dir")
        }
        FrmError::AccountUnavailable { .. } => {
            Some("check the account's path or endpoint in config.toml")
        }
        FrmError::PartialWriteFailure { .. } => {
            Some("run the command again; copies already updated are left as they are")
        }
        FrmError::InvalidDuration { .. } => Some("use a number with d, w, or m, e.g. 2w"),
        _ => None,
    }
}

fn argv_requests_json(args: &[String]) -> bool {
    args.iter().enumerate().any(|(i, arg)| {
        arg == "--format=json"
            || (arg == "--format" && args.get(i + 1).is_some_and(|v| v == "json"))
    })
}
