//! Spread scheduling for never-contacted contacts
//!
//! After a bulk import every tracked contact is overdue at once. Spreading
//! snoozes each never-contacted contact to an independent, uniformly random
//! point inside its own frequency window so they come due gradually.
//!
//! Planning is pure; only [`apply`] writes.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::aggregator::{Account, Aggregator, ContactPool};
use crate::contact::{metadata, ContactRecord};
use crate::due::DueEngine;
use crate::duration::start_of_day;
use crate::error::{FrmError, Result};

/// A tracked contact with no ledger history
#[derive(Debug, Clone)]
pub struct SpreadCandidate<'a> {
    pub account: &'a Account,
    pub record: ContactRecord,
    pub interval: Duration,
}

impl SpreadCandidate<'_> {
    pub fn name(&self) -> &str {
        self.record.display_name()
    }
}

/// Candidates sharing one frequency string
#[derive(Debug, Clone)]
pub struct SpreadGroup<'a> {
    pub frequency: String,
    pub members: Vec<SpreadCandidate<'a>>,
}

/// One planned snooze
#[derive(Debug, Clone)]
pub struct PlannedSnooze<'a> {
    pub candidate: SpreadCandidate<'a>,
    pub snooze_until: NaiveDate,
    pub due_in_days: i64,
}

#[derive(Debug, Clone)]
pub struct PlannedGroup<'a> {
    pub frequency: String,
    pub snoozes: Vec<PlannedSnooze<'a>>,
}

/// The projected outcome of a spread run
#[derive(Debug, Clone, Default)]
pub struct SpreadPlan<'a> {
    pub groups: Vec<PlannedGroup<'a>>,
}

impl<'a> SpreadPlan<'a> {
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.snoozes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snoozes(&self) -> impl Iterator<Item = &PlannedSnooze<'a>> {
        self.groups.iter().flat_map(|g| g.snoozes.iter())
    }
}

/// Never-contacted candidates grouped by frequency. Ignored, snoozed,
/// untracked and previously contacted records are left out; so is any
/// record whose frequency does not parse. Groups are ordered by frequency
/// string, members by name.
pub fn candidates<'a>(pool: &ContactPool<'a>, engine: &DueEngine) -> Vec<SpreadGroup<'a>> {
    let now = engine.now();
    let mut groups: BTreeMap<String, Vec<SpreadCandidate<'a>>> = BTreeMap::new();

    for (account, record) in pool.named() {
        if metadata::is_snoozed(&record.card, now) || engine.last_contact(record).is_some() {
            continue;
        }
        let Some(report) = engine.evaluate(record) else {
            continue;
        };
        groups
            .entry(report.frequency)
            .or_default()
            .push(SpreadCandidate {
                account,
                record: record.clone(),
                interval: report.interval,
            });
    }

    groups
        .into_iter()
        .map(|(frequency, mut members)| {
            members.sort_by(|a, b| a.name().cmp(b.name()));
            SpreadGroup { frequency, members }
        })
        .collect()
}

/// Draw a snooze date for each candidate
pub fn plan<'a, R: Rng>(
    groups: Vec<SpreadGroup<'a>>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> SpreadPlan<'a> {
    let groups: Vec<PlannedGroup<'a>> = groups
        .into_iter()
        .map(|group| PlannedGroup {
            frequency: group.frequency,
            snoozes: group
                .members
                .into_iter()
                .map(|candidate| {
                    let snooze_until = snooze_date(now, draw_offset(candidate.interval, rng));
                    let due_in_days = (start_of_day(snooze_until) - now).num_days();
                    PlannedSnooze {
                        candidate,
                        snooze_until,
                        due_in_days,
                    }
                })
                .collect(),
        })
        .collect();

    let plan = SpreadPlan { groups };
    info!(contacts = plan.len(), "planned spread");
    plan
}

/// Uniform offset in `[0, interval)`, at one-second resolution
fn draw_offset<R: Rng>(interval: Duration, rng: &mut R) -> Duration {
    let seconds = interval.num_seconds();
    if seconds <= 0 {
        return Duration::zero();
    }
    Duration::seconds(rng.gen_range(0..seconds))
}

/// Calendar date of `now + offset`, never earlier than tomorrow
fn snooze_date(now: DateTime<Utc>, offset: Duration) -> NaiveDate {
    let today = now.date_naive();
    let drawn = (now + offset).date_naive();
    if drawn > today {
        drawn
    } else {
        today.succ_opt().unwrap_or(today)
    }
}

/// Write every planned snooze through the aggregator, in plan order.
/// Returns the number of contacts snoozed.
pub fn apply(aggregator: &Aggregator, plan: &SpreadPlan<'_>) -> Result<usize> {
    let mut succeeded: Vec<String> = Vec::new();
    for snooze in plan.snoozes() {
        let candidate = &snooze.candidate;
        let mut record = candidate.record.clone();
        metadata::set_snooze_until(&mut record.card, snooze.snooze_until);

        match aggregator.update_contact(candidate.account, &record) {
            Ok(_) => {
                debug!(contact = candidate.name(), until = %snooze.snooze_until, "snoozed");
                succeeded.push(candidate.name().to_string());
            }
            Err(e) if succeeded.is_empty() => return Err(e),
            Err(e) => {
                return Err(FrmError::PartialWriteFailure {
                    succeeded,
                    failed: candidate.name().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
    Ok(succeeded.len())
}
