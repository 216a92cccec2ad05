//! Core types: ICS parsing, event classification, formatting

pub mod classify;
pub mod format;
pub mod ics;
pub mod raw_event;
pub mod tracing;

pub use classify::{is_all_day, is_multi_day, EventKind};
pub use format::{format_date, format_time, local_date, local_datetime, SECONDS_PER_DAY};
pub use ics::{decode_text, parse_datetime, parse_ics_content, unfold_lines, IcsParser};
pub use raw_event::{CalendarFields, RawEvent, RawEventTime};
pub use self::tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
