//! ICS date and date-time values.
//!
//! Only the two fixed-width forms are understood:
//! - `YYYYMMDD` when the property carries `VALUE=DATE`
//! - `YYYYMMDDTHHMMSS` with an optional trailing `Z`
//!
//! Anything else is kept as a raw string with no calendar fields.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::raw_event::{CalendarFields, RawEventTime};

const SECONDS_PER_HOUR: i64 = 3_600;

static TZID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TZID=([^;]+)").expect("Invalid TZID regex"));

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})$").expect("Invalid date regex"));

static DATE_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})T([0-9]{2})([0-9]{2})([0-9]{2})(Z)?$")
        .expect("Invalid date-time regex")
});

/// Parses a DTSTART/DTEND/CREATED/LAST-MODIFIED value.
///
/// `params` is everything between the property name and the colon, without
/// the leading `;`. The local timestamp of a UTC value is corrected by
/// subtracting `site_utc_offset_hours` hours.
pub fn parse_datetime(value: &str, params: &str, site_utc_offset_hours: i32) -> RawEventTime {
    let value = value.trim();
    let is_date_only = params.contains("VALUE=DATE");

    let mut time = RawEventTime::unparsed(value, is_date_only);
    time.timezone_id = TZID_REGEX
        .captures(params)
        .map(|caps| caps[1].to_string());

    if is_date_only {
        if let Some(caps) = DATE_REGEX.captures(value) {
            let fields = CalendarFields::date(number(&caps, 1), number(&caps, 2), number(&caps, 3));
            time.epoch_seconds = local_timestamp(&fields);
            time.fields = Some(fields);
        }
    } else if let Some(caps) = DATE_TIME_REGEX.captures(value) {
        let fields = CalendarFields::date_time(
            number(&caps, 1),
            number(&caps, 2),
            number(&caps, 3),
            number(&caps, 4),
            number(&caps, 5),
            number(&caps, 6),
        );
        let is_utc = caps.get(7).is_some();
        time.epoch_seconds = local_timestamp(&fields).map(|ts| {
            if is_utc {
                ts - i64::from(site_utc_offset_hours) * SECONDS_PER_HOUR
            } else {
                ts
            }
        });
        time.is_utc = is_utc;
        time.fields = Some(fields);
    }

    time
}

/// Seconds since the epoch of the wall-clock reading, taken without a zone.
fn local_timestamp(fields: &CalendarFields) -> Option<i64> {
    fields.to_naive().map(|naive| naive.and_utc().timestamp())
}

/// Reads an ASCII-digit capture group. The regexes only admit `[0-9]`.
fn number<T: std::str::FromStr + Default>(caps: &Captures<'_>, index: usize) -> T {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default()
}
