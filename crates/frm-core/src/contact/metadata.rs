//! Tracking fields stored as vCard extension properties
//!
//! Four independent properties turn a plain contact into a tracked one.
//! Each accessor touches exactly one key.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use super::card::Card;
use crate::duration::{start_of_day, DATE_FORMAT};

pub const FIELD_FREQUENCY: &str = "X-FRM-FREQUENCY";
pub const FIELD_IGNORE: &str = "X-FRM-IGNORE";
pub const FIELD_GROUP: &str = "X-FRM-GROUP";
pub const FIELD_SNOOZE_UNTIL: &str = "X-FRM-SNOOZE-UNTIL";

fn non_empty<'a>(card: &'a Card, name: &str) -> Option<&'a str> {
    card.preferred_value(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Contact frequency, `None` when untracked
pub fn frequency(card: &Card) -> Option<&str> {
    non_empty(card, FIELD_FREQUENCY)
}

pub fn set_frequency(card: &mut Card, frequency: &str) {
    card.set(FIELD_FREQUENCY, frequency);
}

pub fn remove_frequency(card: &mut Card) -> bool {
    card.remove(FIELD_FREQUENCY)
}

/// Only the exact string `"true"` marks a contact as ignored
pub fn is_ignored(card: &Card) -> bool {
    card.preferred_value(FIELD_IGNORE) == Some("true")
}

pub fn set_ignored(card: &mut Card) {
    card.set(FIELD_IGNORE, "true");
}

pub fn remove_ignored(card: &mut Card) -> bool {
    card.remove(FIELD_IGNORE)
}

pub fn group(card: &Card) -> Option<&str> {
    non_empty(card, FIELD_GROUP)
}

pub fn set_group(card: &mut Card, group: &str) {
    card.set(FIELD_GROUP, group);
}

pub fn remove_group(card: &mut Card) -> bool {
    card.remove(FIELD_GROUP)
}

/// Snooze date, `None` when absent or unparsable
pub fn snooze_until(card: &Card) -> Option<NaiveDate> {
    let raw = non_empty(card, FIELD_SNOOZE_UNTIL)?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(value = raw, error = %e, "ignoring unparsable snooze date");
            None
        }
    }
}

/// The instant a snooze ends: midnight UTC at the start of the snooze date
pub fn snooze_until_instant(card: &Card) -> Option<DateTime<Utc>> {
    snooze_until(card).map(start_of_day)
}

pub fn set_snooze_until(card: &mut Card, date: NaiveDate) {
    card.set(FIELD_SNOOZE_UNTIL, date.format(DATE_FORMAT).to_string());
}

pub fn remove_snooze_until(card: &mut Card) -> bool {
    card.remove(FIELD_SNOOZE_UNTIL)
}

/// True while `now` is strictly before the snooze date
pub fn is_snoozed(card: &Card, now: DateTime<Utc>) -> bool {
    snooze_until_instant(card).is_some_and(|until| now < until)
}

/// All four tracking fields decoded at once
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackingFields {
    pub frequency: Option<String>,
    pub ignored: bool,
    pub group: Option<String>,
    pub snooze_until: Option<NaiveDate>,
}

impl TrackingFields {
    pub fn read(card: &Card) -> Self {
        Self {
            frequency: frequency(card).map(str::to_string),
            ignored: is_ignored(card),
            group: group(card).map(str::to_string),
            snooze_until: snooze_until(card),
        }
    }

    /// Tracked means a frequency is set and the contact is not ignored
    pub fn is_tracked(&self) -> bool {
        self.frequency.is_some() && !self.ignored
    }
}
