//! `frm triage` command - assign frequencies to untracked contacts
//!
//! Walks untracked, non-ignored contacts in name order and reads one
//! choice per contact. Each choice is written immediately, so quitting
//! halfway keeps the decisions already made.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::cli::Cli;
use crate::commands::format::is_json;
use frm_core::aggregator::{Account, Aggregator};
use frm_core::contact::card::{FIELD_EMAIL, FIELD_ORGANIZATION, FIELD_TELEPHONE};
use frm_core::contact::{metadata, ContactRecord};
use frm_core::context::{collect_context, ContextProvider};
use frm_core::error::Result;

const PROMPT: &str = "  [m]onthly  [q]uarterly  [y]early  [s]kip  [i]gnore  [Enter=skip]> ";

/// A negative limit means no limit
pub fn limit_from(limit: i64) -> Option<usize> {
    usize::try_from(limit).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Frequency(&'static str),
    Ignore,
    Skip,
}

impl Choice {
    fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "m" => Choice::Frequency("1m"),
            "q" => Choice::Frequency("3m"),
            "y" => Choice::Frequency("12m"),
            "i" => Choice::Ignore,
            _ => Choice::Skip,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    monthly: usize,
    quarterly: usize,
    yearly: usize,
    skipped: usize,
    ignored: usize,
}

impl Tally {
    fn record(&mut self, choice: Choice) {
        match choice {
            Choice::Frequency("1m") => self.monthly += 1,
            Choice::Frequency("3m") => self.quarterly += 1,
            Choice::Frequency(_) => self.yearly += 1,
            Choice::Ignore => self.ignored += 1,
            Choice::Skip => self.skipped += 1,
        }
    }

    fn total(&self) -> usize {
        self.monthly + self.quarterly + self.yearly + self.skipped + self.ignored
    }
}

#[derive(Debug, Serialize)]
struct Candidate<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    context: Vec<String>,
}

impl<'a> Candidate<'a> {
    fn describe(record: &'a ContactRecord, providers: &[Box<dyn ContextProvider>]) -> Self {
        let card = &record.card;
        Self {
            name: record.display_name(),
            email: card.preferred_value(FIELD_EMAIL).filter(|v| !v.is_empty()),
            org: card
                .preferred_value(FIELD_ORGANIZATION)
                .map(|org| org.trim_end_matches([';', ' ']).to_string())
                .filter(|org| !org.is_empty()),
            phone: card.preferred_value(FIELD_TELEPHONE).filter(|v| !v.is_empty()),
            context: collect_context(providers, record),
        }
    }

    fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.name)?;
        for detail in [self.email, self.org.as_deref(), self.phone].into_iter().flatten() {
            writeln!(out, "  {detail}")?;
        }
        for line in &self.context {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

pub fn execute<R: BufRead, W: Write>(
    cli: &Cli,
    aggregator: &Aggregator,
    providers: &[Box<dyn ContextProvider>],
    limit: Option<usize>,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let pool = aggregator.pool_all()?;
    let mut untriaged: Vec<(&Account, &ContactRecord)> = pool
        .named()
        .filter(|(_, r)| metadata::frequency(&r.card).is_none() && !metadata::is_ignored(&r.card))
        .collect();
    untriaged.sort_by(|a, b| a.1.display_name().cmp(b.1.display_name()));
    if let Some(limit) = limit {
        untriaged.truncate(limit);
    }

    if is_json(cli) {
        let candidates: Vec<Candidate<'_>> = untriaged
            .iter()
            .map(|(_, record)| Candidate::describe(record, providers))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&candidates)?)?;
        return Ok(());
    }

    let mut tally = Tally::default();
    for (account, record) in untriaged {
        Candidate::describe(record, providers).write_to(out)?;
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        let choice = Choice::parse(&line);

        let mut updated = record.clone();
        match choice {
            Choice::Frequency(frequency) => metadata::set_frequency(&mut updated.card, frequency),
            Choice::Ignore => metadata::set_ignored(&mut updated.card),
            Choice::Skip => {}
        }
        if choice != Choice::Skip {
            aggregator.update_contact(account, &updated)?;
        }
        tally.record(choice);
    }

    writeln!(
        out,
        "Triaged {} contacts: {} monthly, {} quarterly, {} yearly, {} skipped, {} ignored",
        tally.total(),
        tally.monthly,
        tally.quarterly,
        tally.yearly,
        tally.skipped,
        tally.ignored
    )?;
    Ok(())
}
