//! Raw event records produced by the ICS parser.
//!
//! A [`RawEvent`] is the transient, loosely-typed view of one `VEVENT` block:
//! every field is optional because feeds in the wild omit almost anything.
//! Temporal properties are kept as [`RawEventTime`], which retains the raw
//! string alongside whatever could be decoded from it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify;

/// Calendar fields decoded from a fixed-width ICS date or date-time value.
///
/// For date-only values the time fields are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarFields {
    /// Creates date-only fields (midnight).
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Creates date-time fields.
    pub fn date_time(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Returns the wall-clock reading these fields describe, if it exists.
    ///
    /// Returns `None` for impossible readings such as month 13 or hour 25.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

/// A parsed ICS date or date-time value.
///
/// `epoch_seconds` is the local timestamp of the value. Values flagged as UTC
/// (trailing `Z`) have the site offset subtracted from that timestamp; TZID
/// parameters are recorded in `timezone_id` but never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventTime {
    /// The value exactly as it appeared after the colon.
    pub raw: String,
    /// Whether the property carried a `VALUE=DATE` parameter.
    pub is_date_only: bool,
    /// The `TZID` parameter, if any.
    pub timezone_id: Option<String>,
    /// Decoded calendar fields, absent when the value did not match.
    pub fields: Option<CalendarFields>,
    /// Whether the value ended with `Z`.
    pub is_utc: bool,
    /// Seconds since the epoch, absent when the value is unusable.
    pub epoch_seconds: Option<i64>,
}

impl RawEventTime {
    /// Creates an undecoded value carrying only the raw text and flags.
    pub fn unparsed(raw: impl Into<String>, is_date_only: bool) -> Self {
        Self {
            raw: raw.into(),
            is_date_only,
            timezone_id: None,
            fields: None,
            is_utc: false,
            epoch_seconds: None,
        }
    }

    /// Returns true if the value can be used for scheduling decisions.
    pub fn is_usable(&self) -> bool {
        self.epoch_seconds.is_some()
    }
}

/// One `VEVENT` block from a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// The feed-assigned stable identifier.
    pub uid: Option<String>,
    /// The event title.
    pub summary: Option<String>,
    /// The event description, markup stripped.
    pub description: Option<String>,
    /// The free-form location string.
    pub location: Option<String>,
    pub dtstart: Option<RawEventTime>,
    pub dtend: Option<RawEventTime>,
    pub created: Option<RawEventTime>,
    pub last_modified: Option<RawEventTime>,
}

impl RawEvent {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no property has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns the UID when it is present and non-blank.
    pub fn external_id(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.trim().is_empty())
    }

    /// Returns the effective title, falling back to "No title" when blank.
    pub fn effective_title(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("No title")
    }

    /// Returns the start epoch when the start is usable.
    pub fn start_epoch(&self) -> Option<i64> {
        self.dtstart.as_ref().and_then(|t| t.epoch_seconds)
    }

    /// Returns the end epoch when the end is usable.
    pub fn end_epoch(&self) -> Option<i64> {
        self.dtend.as_ref().and_then(|t| t.epoch_seconds)
    }

    /// Returns true if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        classify::is_all_day(self)
    }

    /// Returns true if this event spans more than one calendar date.
    pub fn is_multi_day(&self) -> bool {
        classify::is_multi_day(self)
    }

    /// Builder method to set the UID.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the start.
    pub fn with_start(mut self, start: RawEventTime) -> Self {
        self.dtstart = Some(start);
        self
    }

    /// Builder method to set the end.
    pub fn with_end(mut self, end: RawEventTime) -> Self {
        self.dtend = Some(end);
        self
    }
}
