//! Command implementations for all frm commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use frm_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use std::io;

    use crate::cli::commands::contact::{AddArgs, ListArgs, LogArgs, NameArgs, TrackArgs};
    use crate::cli::commands::meta::{SnoozeArgs, SpreadArgs, TriageArgs};
    use crate::cli::GroupCommands;
    use crate::commands::{
        add, check, contacts, context, group, history, ignore, list, log, snooze, spread, stats,
        track, triage,
    };
    use frm_core::contact::NewContact;
    use frm_core::context::init_providers;
    use frm_core::due::DueEngine;
    use frm_core::ledger::LastContactIndex;

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        match cmd {
            Commands::Contacts => execute_contacts(ctx),
            Commands::Add(args) => execute_add(ctx, args),
            Commands::Track(args) => execute_track(ctx, args),
            Commands::Untrack(args) => execute_untrack(ctx, args),
            Commands::Log(args) => execute_log(ctx, args),
            Commands::History(args) => execute_history(ctx, args),
            Commands::Check => execute_check(ctx),
            Commands::List(args) => execute_list(ctx, args),
            Commands::Stats => execute_stats(ctx),
            Commands::Group { command } => execute_group(ctx, command),
            Commands::Ignore(args) => execute_ignore(ctx, args),
            Commands::Unignore(args) => execute_unignore(ctx, args),
            Commands::Snooze(args) => execute_snooze(ctx, args),
            Commands::Unsnooze(args) => execute_unsnooze(ctx, args),
            Commands::Spread(args) => execute_spread(ctx, args),
            Commands::Context(args) => execute_context(ctx, args),
            Commands::Triage(args) => execute_triage(ctx, args),
        }
    }

    fn execute_contacts(ctx: &CommandContext) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        contacts::execute(ctx.cli, &aggregator)
    }

    fn execute_add(ctx: &CommandContext, args: &AddArgs) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        let contact = NewContact {
            email: args.email.clone(),
            phone: args.phone.clone(),
            org: args.org.clone(),
            url: args.url.clone(),
            ..NewContact::new(args.name.as_str())
        };
        add::execute(ctx.cli, &aggregator, contact)
    }

    fn execute_track(ctx: &CommandContext, args: &TrackArgs) -> Result<()> {
        // reject a bad interval before touching any account
        frm_core::duration::parse_duration(&args.every)?;
        let aggregator = ctx.open_accounts()?;
        track::execute_track(ctx.cli, &aggregator, &args.name, &args.every)
    }

    fn execute_untrack(ctx: &CommandContext, args: &NameArgs) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        track::execute_untrack(ctx.cli, &aggregator, &args.name)
    }

    fn execute_log(ctx: &CommandContext, args: &LogArgs) -> Result<()> {
        let time = match &args.date {
            Some(date) => frm_core::duration::parse_absolute_or_relative_date(date, ctx.now)?,
            None => ctx.now,
        };
        let aggregator = ctx.open_accounts().ok();
        log::execute(
            ctx.cli,
            aggregator.as_ref(),
            &ctx.ledger(),
            &args.name,
            args.note.clone(),
            time,
        )
    }

    fn execute_history(ctx: &CommandContext, args: &NameArgs) -> Result<()> {
        let aggregator = ctx.open_accounts().ok();
        history::execute(ctx.cli, aggregator.as_ref(), &ctx.ledger(), &args.name)
    }

    fn execute_check(ctx: &CommandContext) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        let engine = ctx.engine(&ctx.ledger())?;
        check::execute(ctx.cli, &aggregator, &engine)
    }

    fn execute_list(ctx: &CommandContext, args: &ListArgs) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        let engine = ctx.engine(&ctx.ledger())?;
        list::execute(ctx.cli, &aggregator, &engine, args.all)
    }

    fn execute_stats(ctx: &CommandContext) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        let entries = ctx.ledger().read_all()?;
        let engine = DueEngine::new(LastContactIndex::from_entries(&entries), ctx.now);
        stats::execute(ctx.cli, &aggregator, &entries, &engine)
    }

    fn execute_group(ctx: &CommandContext, command: &GroupCommands) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        match command {
            GroupCommands::Set { name, group } => group::execute_set(ctx.cli, &aggregator, name, group),
            GroupCommands::Unset { name } => group::execute_unset(ctx.cli, &aggregator, name),
            GroupCommands::List { group } => {
                group::execute_list(ctx.cli, &aggregator, group.as_deref())
            }
        }
    }

    fn execute_ignore(ctx: &CommandContext, args: &NameArgs) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        ignore::execute_ignore(ctx.cli, &aggregator, &args.name)
    }

    fn execute_unignore(ctx: &CommandContext, args: &NameArgs) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        ignore::execute_unignore(ctx.cli, &aggregator, &args.name)
    }

    fn execute_snooze(ctx: &CommandContext, args: &SnoozeArgs) -> Result<()> {
        let until = frm_core::duration::parse_until(&args.until, ctx.now)?;
        let aggregator = ctx.open_accounts()?;
        snooze::execute_snooze(ctx.cli, &aggregator, &args.name, until.date_naive())
    }

    fn execute_unsnooze(ctx: &CommandContext, args: &NameArgs) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        snooze::execute_unsnooze(ctx.cli, &aggregator, &args.name)
    }

    fn execute_spread(ctx: &CommandContext, args: &SpreadArgs) -> Result<()> {
        let aggregator = ctx.open_accounts()?;
        let engine = ctx.engine(&ctx.ledger())?;
        spread::execute(
            ctx.cli,
            &aggregator,
            &engine,
            args.apply,
            &mut rand::thread_rng(),
        )
    }

    fn execute_context(ctx: &CommandContext, args: &NameArgs) -> Result<()> {
        let config = ctx.config()?;
        let aggregator = ctx.aggregator(&config)?;
        let ledger = ctx.ledger();
        let engine = ctx.engine(&ledger)?;
        let providers = init_providers(&config);
        context::execute(
            ctx.cli,
            &aggregator,
            &ledger,
            &engine,
            &providers,
            &args.name,
        )
    }

    fn execute_triage(ctx: &CommandContext, args: &TriageArgs) -> Result<()> {
        let config = ctx.config()?;
        let aggregator = ctx.aggregator(&config)?;
        let providers = init_providers(&config);
        let stdin = io::stdin();
        let stdout = io::stdout();
        triage::execute(
            ctx.cli,
            &aggregator,
            &providers,
            triage::limit_from(args.limit),
            &mut stdin.lock(),
            &mut stdout.lock(),
        )
    }
}
