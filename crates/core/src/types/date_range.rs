//! Calendar dates and the inclusive reporting window.
//!
//! Every date here is a local calendar date (`NaiveDate`), never an instant.
//! `"2024-11-28"` means the 28th wherever the report is viewed; nothing in
//! this module consults the process timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Calendar date format used on the wire and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp layouts accepted for record dates, besides RFC 3339 and plain dates.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Errors that can occur when building a [`DateRange`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// The input is not a `YYYY-MM-DD` date.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    /// The start date falls after the end date.
    #[error("start date {start} is after end date {end}")]
    Inverted {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

/// Parse a `YYYY-MM-DD` string as a local calendar date.
///
/// # Errors
///
/// Returns [`DateRangeError::InvalidDate`] if the input is not a valid date.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DateRangeError::InvalidDate(s.to_owned()))
}

/// Format a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a sales record date.
///
/// Accepts plain dates (taken as local midnight), naive timestamps, and
/// RFC 3339 timestamps. For the latter the wall-clock time at the stated
/// offset is kept, so `2024-11-28T23:30:00-08:00` stays on the 28th.
#[must_use]
pub fn parse_record_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(stamped) = DateTime::parse_from_rfc3339(s) {
        return Some(stamped.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// An inclusive range of calendar days.
///
/// A timestamp is inside the range when it falls anywhere from
/// `start 00:00:00` through the last instant of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Inverted`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is invalid or the range is inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_calendar_date(start)?, parse_calendar_date(end)?)
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether a timestamp falls on one of the range's days.
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let day = at.date();
        self.start <= day && day <= self.end
    }

    /// Number of days covered, counting both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            format_calendar_date(self.start),
            format_calendar_date(self.end)
        )
    }
}
