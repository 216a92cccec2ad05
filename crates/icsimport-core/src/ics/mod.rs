//! ICS/iCalendar feed parsing.
//!
//! This module turns raw feed text into [`RawEvent`] records. It is a
//! best-effort reader: nothing here fails, lines it cannot interpret are
//! dropped.
//!
//! Parsing happens in two passes:
//! 1. [`unfold_lines`] joins folded continuation lines into logical lines.
//! 2. [`IcsParser`] folds the logical lines through a small
//!    `Outside`/`InEvent` state machine, emitting a record for every
//!    balanced `BEGIN:VEVENT`/`END:VEVENT` pair.

mod datetime;
mod text;

use tracing::{debug, trace};

use crate::raw_event::RawEvent;

pub use datetime::parse_datetime;
pub use text::{decode_text, strip_tags};

/// Parses ICS content and extracts events in source order.
///
/// Shorthand for `IcsParser::new(site_utc_offset_hours).parse(ics)`.
pub fn parse_ics_content(ics: &str, site_utc_offset_hours: i32) -> Vec<RawEvent> {
    IcsParser::new(site_utc_offset_hours).parse(ics)
}

/// Normalizes line endings and joins folded lines.
///
/// A physical line starting with a single space or tab continues the
/// previous logical line; exactly one leading whitespace character is
/// removed before appending. A continuation with nothing before it starts
/// a logical line of its own.
pub fn unfold_lines(ics: &str) -> Vec<String> {
    let normalized = ics.replace("\r\n", "\n").replace('\r', "\n");

    let mut logical = Vec::new();
    let mut buffer: Option<String> = None;

    for line in normalized.split('\n') {
        if let (Some(buf), Some(rest)) = (buffer.as_mut(), line.strip_prefix([' ', '\t'])) {
            buf.push_str(rest);
            continue;
        }

        if let Some(previous) = buffer.replace(line.to_string()) {
            logical.push(previous);
        }
    }

    logical.extend(buffer);
    logical
}

/// Where the parser is relative to a `VEVENT` block.
#[derive(Debug)]
enum ParseState {
    Outside,
    InEvent(RawEvent),
}

/// Line-oriented VEVENT extractor.
#[derive(Debug, Clone, Copy)]
pub struct IcsParser {
    site_utc_offset_hours: i32,
}

impl IcsParser {
    /// Creates a parser that corrects UTC values by the given site offset.
    pub fn new(site_utc_offset_hours: i32) -> Self {
        Self {
            site_utc_offset_hours,
        }
    }

    /// Parses feed text into records, in source order.
    ///
    /// A `BEGIN:VEVENT` that is never closed yields nothing, and a closed
    /// block without any recognised property is dropped.
    pub fn parse(&self, ics: &str) -> Vec<RawEvent> {
        let mut events = Vec::new();

        let final_state = unfold_lines(ics)
            .iter()
            .fold(ParseState::Outside, |state, line| {
                self.step(state, line, &mut events)
            });

        if let ParseState::InEvent(pending) = final_state {
            debug!(uid = ?pending.uid, "Dropping unterminated VEVENT");
        }

        debug!(count = events.len(), "Parsed ICS content");
        events
    }

    /// Advances the state machine by one logical line.
    fn step(&self, state: ParseState, line: &str, events: &mut Vec<RawEvent>) -> ParseState {
        match line.trim_end() {
            "BEGIN:VEVENT" => return ParseState::InEvent(RawEvent::new()),
            "END:VEVENT" => {
                if let ParseState::InEvent(event) = state
                    && !event.is_empty()
                {
                    debug!(
                        uid = ?event.uid,
                        summary = ?event.summary,
                        start = ?event.dtstart.as_ref().map(|t| &t.raw),
                        "Parsed event from ICS"
                    );
                    events.push(event);
                }
                return ParseState::Outside;
            }
            _ => {}
        }

        match state {
            ParseState::Outside => ParseState::Outside,
            ParseState::InEvent(mut event) => {
                self.apply_property(&mut event, line);
                ParseState::InEvent(event)
            }
        }
    }

    /// Stores a `NAME[;PARAMS]:VALUE` line on the record being built.
    fn apply_property(&self, event: &mut RawEvent, line: &str) {
        let Some((property_spec, value)) = line.split_once(':') else {
            return;
        };
        let (name, params) = property_spec.split_once(';').unwrap_or((property_spec, ""));
        let offset = self.site_utc_offset_hours;

        match name {
            "DTSTART" => event.dtstart = Some(parse_datetime(value, params, offset)),
            "DTEND" => event.dtend = Some(parse_datetime(value, params, offset)),
            "CREATED" => event.created = Some(parse_datetime(value, params, offset)),
            "LAST-MODIFIED" => event.last_modified = Some(parse_datetime(value, params, offset)),
            "SUMMARY" => event.summary = Some(decode_text(value)),
            "DESCRIPTION" => event.description = Some(decode_text(value)),
            "LOCATION" => event.location = Some(decode_text(value)),
            "UID" => event.uid = Some(value.trim().to_string()),
            other => trace!(property = other, "Ignoring ICS property"),
        }
    }
}

impl Default for IcsParser {
    fn default() -> Self {
        Self::new(0)
    }
}
