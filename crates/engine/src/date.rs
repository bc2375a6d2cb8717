//! Calendar-date normalization.
//!
//! Records carry dates as `YYYY-MM-DD` strings. Everything that buckets or
//! compares dates goes through [`parse_date`], which yields a plain
//! [`NaiveDate`] with no time of day and no time zone, so two strings naming
//! the same day always compare equal regardless of where the host runs.
//!
//! "Today" is the only time-zone dependent value; it is computed once by the
//! caller (see [`today_in`]) and passed into the engine explicitly.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Storage format of every date in the books.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// Returns `None` for empty, malformed or impossible dates.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// Like [`parse_date`] for optional fields.
#[must_use]
pub fn parse_optional_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(parse_date)
}

/// Formats a date back into the storage format.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's calendar date in the given time zone.
#[must_use]
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// First day of the month containing `date`.
#[must_use]
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Most recent Sunday on or before `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = i64::from(date.weekday().num_days_from_sunday());
    date - Duration::days(offset)
}
