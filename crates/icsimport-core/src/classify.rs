//! All-day and multi-day classification of parsed events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::local_date;
use crate::raw_event::RawEvent;

/// Returns true if the event starts with a date-only value.
pub fn is_all_day(event: &RawEvent) -> bool {
    event.dtstart.as_ref().is_some_and(|start| start.is_date_only)
}

/// Returns true if the event's start and end fall on different dates.
///
/// Both timestamps must be usable; an event without a usable end is never
/// multi-day. Dates are compared on the raw timestamps, so an all-day event
/// whose exclusive end is the next day counts as multi-day here.
pub fn is_multi_day(event: &RawEvent) -> bool {
    match (event.start_epoch(), event.end_epoch()) {
        (Some(start), Some(end)) => match (local_date(start), local_date(end)) {
            (Some(start_date), Some(end_date)) => start_date != end_date,
            _ => false,
        },
        _ => false,
    }
}

/// The date/time shape of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A single day with a start time.
    Timed,
    /// A single all-day date.
    AllDay,
    /// Timed, spanning several dates.
    MultiDay,
    /// All-day, spanning several dates.
    AllDayMultiDay,
}

impl EventKind {
    /// Classifies an event.
    pub fn of(event: &RawEvent) -> Self {
        match (is_all_day(event), is_multi_day(event)) {
            (false, false) => Self::Timed,
            (true, false) => Self::AllDay,
            (false, true) => Self::MultiDay,
            (true, true) => Self::AllDayMultiDay,
        }
    }

    /// Returns true for the all-day shapes.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay | Self::AllDayMultiDay)
    }

    /// Returns true for the multi-day shapes.
    pub fn is_multi_day(&self) -> bool {
        matches!(self, Self::MultiDay | Self::AllDayMultiDay)
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Timed => "Single Day with Time",
            Self::AllDay => "All Day",
            Self::MultiDay => "Multi Day",
            Self::AllDayMultiDay => "All Day, Multi Day",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
