//! Display formatting for event dates and times.
//!
//! Epoch values produced by the parser are naive local timestamps, so they
//! are rendered without any further zone conversion.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Returns the wall-clock reading of a local timestamp.
pub fn local_datetime(epoch_seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(epoch_seconds, 0).map(|dt| dt.naive_utc())
}

/// Returns the calendar date of a local timestamp.
pub fn local_date(epoch_seconds: i64) -> Option<NaiveDate> {
    local_datetime(epoch_seconds).map(|dt| dt.date())
}

/// Formats a local timestamp as a long date, e.g. `March 5, 2024`.
pub fn format_date(epoch_seconds: i64) -> Option<String> {
    local_datetime(epoch_seconds).map(|dt| dt.format("%B %-d, %Y").to_string())
}

/// Formats a local timestamp as a 12-hour time, e.g. `9:30 am`.
pub fn format_time(epoch_seconds: i64) -> Option<String> {
    local_datetime(epoch_seconds).map(|dt| dt.format("%-I:%M %P").to_string())
}
