//! Interval and date parsing
//!
//! Intervals are written `<integer><unit>` with unit `d` (1 day), `w` (7 days)
//! or `m` (30 days; a fixed approximation, not a calendar month).

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{FrmError, Result};

/// Calendar date format used for absolute dates and snooze fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an interval such as `"2w"`, `"1m"` or `"3d"`.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let s = input.trim();
    if s.len() < 2 {
        return Err(FrmError::invalid_duration(input, "too short"));
    }

    let Some((split, suffix)) = s.char_indices().last() else {
        return Err(FrmError::invalid_duration(input, "too short"));
    };
    let days_per_unit: i64 = match suffix {
        'd' => 1,
        'w' => 7,
        'm' => 30,
        other => {
            return Err(FrmError::invalid_duration(
                input,
                format!("unknown suffix {other:?} (use d, w, or m)"),
            ))
        }
    };

    let count: i64 = s[..split]
        .parse()
        .map_err(|e| FrmError::invalid_duration(input, e))?;
    if count < 0 {
        return Err(FrmError::invalid_duration(input, "must not be negative"));
    }

    count
        .checked_mul(days_per_unit)
        .and_then(Duration::try_days)
        .ok_or_else(|| FrmError::invalid_duration(input, "out of range"))
}

/// Parse a calendar date (`YYYY-MM-DD`) as midnight UTC.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| FrmError::invalid_date(input, e))?;
    Ok(start_of_day(date))
}

/// Midnight UTC at the start of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Parse a point in the past: `-2w` means two weeks before `now`, anything
/// else must be a calendar date.
pub fn parse_absolute_or_relative_date(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let s = input.trim();
    if let Some(relative) = s.strip_prefix('-') {
        let offset = parse_duration(relative).map_err(|e| FrmError::invalid_date(input, e))?;
        return now
            .checked_sub_signed(offset)
            .ok_or_else(|| FrmError::invalid_date(input, "out of range"));
    }
    parse_date(s).map_err(|_| {
        FrmError::invalid_date(input, "expected YYYY-MM-DD or a relative duration like -2w")
    })
}

/// Parse a point in the future: a calendar date wins, otherwise a duration
/// added to `now` (so `2m` means two months from now).
pub fn parse_until(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if let Ok(date) = parse_date(input) {
        return Ok(date);
    }
    let offset = parse_duration(input).map_err(|_| {
        FrmError::invalid_date(input, "expected YYYY-MM-DD or a duration like 2m, 6w")
    })?;
    now.checked_add_signed(offset)
        .ok_or_else(|| FrmError::invalid_date(input, "out of range"))
}

/// Render an elapsed duration compactly: days under a week, weeks under
/// thirty days, months beyond.
pub fn format_ago(elapsed: Duration) -> String {
    let days = elapsed.num_days();
    if days < 7 {
        format!("{days}d")
    } else if days < 30 {
        format!("{}w", days / 7)
    } else {
        format!("{}m", days / 30)
    }
}
