//! Due-date evaluation
//!
//! A tracked contact is due when its frequency window has elapsed since the
//! last logged interaction. An active snooze overrides everything else; a
//! contact with no history at all is overdue immediately.
//!
//! Day counts are whole days truncated toward zero, so a contact with half a
//! day left reports `due_in_days == 0` and counts as overdue.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::warn;

use crate::contact::{metadata, ContactRecord};
use crate::duration::parse_duration;
use crate::ledger::LastContactIndex;

/// Where a tracked contact stands relative to its schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// Suppressed until the snooze date
    Snoozed { until: NaiveDate, due_in_days: i64 },
    /// No ledger history; overdue unconditionally
    NeverContacted,
    /// Frequency window measured from the last interaction
    Scheduled {
        last_contact: DateTime<Utc>,
        due_in_days: i64,
    },
}

impl DueStatus {
    /// Signed day count: negative overdue, zero due now, positive remaining.
    /// Never-contacted reports 0.
    pub fn due_in_days(&self) -> i64 {
        match self {
            DueStatus::Snoozed { due_in_days, .. } | DueStatus::Scheduled { due_in_days, .. } => {
                *due_in_days
            }
            DueStatus::NeverContacted => 0,
        }
    }

    pub fn is_overdue(&self) -> bool {
        match self {
            DueStatus::Snoozed { .. } => false,
            DueStatus::NeverContacted => true,
            DueStatus::Scheduled { due_in_days, .. } => *due_in_days <= 0,
        }
    }

    pub fn is_snoozed(&self) -> bool {
        matches!(self, DueStatus::Snoozed { .. })
    }

    pub fn last_contact(&self) -> Option<DateTime<Utc>> {
        match self {
            DueStatus::Scheduled { last_contact, .. } => Some(*last_contact),
            _ => None,
        }
    }
}

/// Evaluation of one tracked contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReport {
    pub name: String,
    pub frequency: String,
    pub interval: Duration,
    pub group: Option<String>,
    pub status: DueStatus,
}

impl DueReport {
    pub fn is_overdue(&self) -> bool {
        self.status.is_overdue()
    }
}

/// Ledger-backed schedule evaluation at a fixed "now"
#[derive(Debug, Clone)]
pub struct DueEngine {
    index: LastContactIndex,
    now: DateTime<Utc>,
}

impl DueEngine {
    pub fn new(index: LastContactIndex, now: DateTime<Utc>) -> Self {
        Self { index, now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn index(&self) -> &LastContactIndex {
        &self.index
    }

    /// Most recent interaction with a record, by path or name
    pub fn last_contact(&self, record: &ContactRecord) -> Option<DateTime<Utc>> {
        self.index.for_record(record)
    }

    /// Evaluate a record. `None` for untracked or ignored records, and for a
    /// frequency that does not parse.
    pub fn evaluate(&self, record: &ContactRecord) -> Option<DueReport> {
        let card = &record.card;
        if metadata::is_ignored(card) {
            return None;
        }
        let frequency = metadata::frequency(card)?;
        let interval = match parse_duration(frequency) {
            Ok(interval) => interval,
            Err(e) => {
                warn!(contact = record.display_name(), path = %record.path, error = %e, "skipping contact with invalid frequency");
                return None;
            }
        };

        Some(DueReport {
            name: record.display_name().to_string(),
            frequency: frequency.to_string(),
            interval,
            group: metadata::group(card).map(str::to_string),
            status: self.status(record, interval),
        })
    }

    fn status(&self, record: &ContactRecord, interval: Duration) -> DueStatus {
        if let Some(until) = metadata::snooze_until(&record.card) {
            let instant = crate::duration::start_of_day(until);
            if self.now < instant {
                return DueStatus::Snoozed {
                    until,
                    due_in_days: (instant - self.now).num_days(),
                };
            }
        }

        match self.last_contact(record) {
            None => DueStatus::NeverContacted,
            Some(last_contact) => DueStatus::Scheduled {
                last_contact,
                due_in_days: (interval - (self.now - last_contact)).num_days(),
            },
        }
    }

    /// Overdue reports among `records`, in input order
    pub fn overdue<'r>(&self, records: impl IntoIterator<Item = &'r ContactRecord>) -> Vec<DueReport> {
        records
            .into_iter()
            .filter(|r| !r.display_name().is_empty())
            .filter_map(|r| self.evaluate(r))
            .filter(DueReport::is_overdue)
            .collect()
    }
}
