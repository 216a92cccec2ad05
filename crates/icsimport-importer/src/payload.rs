//! RawEvent to store payload conversion.
//!
//! This module maps a parsed [`RawEvent`] onto the field layout of the
//! target store. The date/time fields depend on the event's shape:
//!
//! | all day | multi day | start time | end date            | end time  |
//! |---------|-----------|------------|---------------------|-----------|
//! | no      | no        | start      |                     |           |
//! | yes     | yes       |            | end minus one day   |           |
//! | yes     | no        |            |                     |           |
//! | no      | yes       | start      | end                 | end       |
//!
//! The start date is always filled. ICS all-day ranges end on the day
//! after the last included day, hence the one-day correction.

use icsimport_core::{EventKind, RawEvent, SECONDS_PER_DAY, format_date, format_time};
use serde::{Deserialize, Serialize};

use crate::location::{LocationParts, parse_location};
use crate::store::CategoryId;

/// The post-level part of a record: title, body and category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub category_id: Option<CategoryId>,
}

impl PostFields {
    /// Builds post fields from an event's summary and description.
    pub fn from_event(event: &RawEvent, category_id: Option<CategoryId>) -> Self {
        Self {
            title: event.summary.clone().unwrap_or_default(),
            content: event.description.clone().unwrap_or_default(),
            category_id,
        }
    }
}

/// The structured event fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFields {
    pub all_day: bool,
    pub multi_day: bool,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    /// Present only when the event had a non-empty location.
    pub location: Option<LocationParts>,
}

impl EventFields {
    /// Builds the event fields for an event.
    ///
    /// Returns `None` when the event has no usable start.
    pub fn from_event(event: &RawEvent) -> Option<Self> {
        let start = event.start_epoch()?;
        let end = event.end_epoch();
        let kind = EventKind::of(event);

        let date = |epoch: i64| format_date(epoch).unwrap_or_default();
        let time = |epoch: i64| format_time(epoch).unwrap_or_default();

        let mut fields = Self {
            all_day: kind.is_all_day(),
            multi_day: kind.is_multi_day(),
            start_date: date(start),
            ..Self::default()
        };

        match kind {
            EventKind::Timed => {
                fields.start_time = time(start);
            }
            EventKind::AllDayMultiDay => {
                if let Some(end) = end {
                    fields.end_date = date(end - SECONDS_PER_DAY);
                }
            }
            EventKind::AllDay => {}
            EventKind::MultiDay => {
                fields.start_time = time(start);
                if let Some(end) = end {
                    fields.end_date = date(end);
                    fields.end_time = time(end);
                }
            }
        }

        fields.location = event
            .location
            .as_deref()
            .filter(|location| !location.is_empty())
            .map(parse_location);

        Some(fields)
    }
}

/// Everything written to the store for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub post: PostFields,
    pub fields: EventFields,
}

impl EventPayload {
    /// Builds the full payload, or `None` when the event has no usable start.
    pub fn from_event(event: &RawEvent, category_id: Option<CategoryId>) -> Option<Self> {
        Some(Self {
            post: PostFields::from_event(event, category_id),
            fields: EventFields::from_event(event)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icsimport_core::parse_ics_content;

    fn single(body: &str, offset: i32) -> RawEvent {
        let ics = format!("BEGIN:VEVENT\nUID:u\nSUMMARY:Event\n{body}\nEND:VEVENT\n");
        parse_ics_content(&ics, offset).remove(0)
    }

    #[test]
    fn all_day_single_date() {
        let event = single(
            "DTSTART;VALUE=DATE:20240301\nDTEND;VALUE=DATE:20240301",
            0,
        );
        let fields = EventFields::from_event(&event).unwrap();

        assert!(fields.all_day);
        assert!(!fields.multi_day);
        assert_eq!(fields.start_date, "March 1, 2024");
        assert_eq!(fields.start_time, "");
        assert_eq!(fields.end_date, "");
        assert_eq!(fields.end_time, "");
    }

    #[test]
    fn all_day_exclusive_end_is_corrected() {
        let event = single(
            "DTSTART;VALUE=DATE:20240301\nDTEND;VALUE=DATE:20240302",
            0,
        );
        let fields = EventFields::from_event(&event).unwrap();

        // Raw dates differ, so the all-day multi-day row applies.
        assert!(fields.all_day);
        assert!(fields.multi_day);
        assert_eq!(fields.start_date, "March 1, 2024");
        assert_eq!(fields.end_date, "March 1, 2024");
        assert_eq!(fields.start_time, "");
        assert_eq!(fields.end_time, "");
    }

    #[test]
    fn all_day_festival() {
        let event = single(
            "DTSTART;VALUE=DATE:20240628\nDTEND;VALUE=DATE:20240701",
            0,
        );
        let fields = EventFields::from_event(&event).unwrap();

        assert_eq!(fields.start_date, "June 28, 2024");
        assert_eq!(fields.end_date, "June 30, 2024");
    }

    #[test]
    fn timed_single_day_leaves_end_blank() {
        let event = single("DTSTART:20240301T093000\nDTEND:20240301T113000", 0);
        let fields = EventFields::from_event(&event).unwrap();

        assert!(!fields.all_day);
        assert!(!fields.multi_day);
        assert_eq!(fields.start_date, "March 1, 2024");
        assert_eq!(fields.start_time, "9:30 am");
        assert_eq!(fields.end_date, "");
        assert_eq!(fields.end_time, "");
    }

    #[test]
    fn timed_multi_day_fills_end() {
        let event = single("DTSTART:20240301T200000\nDTEND:20240303T140000", 0);
        let fields = EventFields::from_event(&event).unwrap();

        assert!(!fields.all_day);
        assert!(fields.multi_day);
        assert_eq!(fields.start_time, "8:00 pm");
        assert_eq!(fields.end_date, "March 3, 2024");
        assert_eq!(fields.end_time, "2:00 pm");
    }

    #[test]
    fn utc_start_is_shifted_by_site_offset() {
        let event = single("DTSTART:20240301T140000Z\nDTEND:20240301T160000Z", -5);
        let fields = EventFields::from_event(&event).unwrap();

        // 14:00 local minus (-5h) lands at 19:00.
        assert_eq!(fields.start_time, "7:00 pm");
        assert!(!fields.multi_day);

        let event = single("DTSTART:20240301T140000Z\nDTEND:20240301T160000Z", 5);
        let fields = EventFields::from_event(&event).unwrap();
        assert_eq!(fields.start_time, "9:00 am");
    }

    #[test]
    fn missing_start_has_no_fields() {
        let event = single("DTEND:20240301T160000", 0);
        assert!(EventFields::from_event(&event).is_none());
        assert!(EventPayload::from_event(&event, None).is_none());
    }

    #[test]
    fn location_is_decomposed() {
        let event = single(
            "DTSTART:20240301T190000\nLOCATION:Town Hall\\, 100 Main St\\, Springfield\\, IL 62704\\, USA",
            0,
        );
        let fields = EventFields::from_event(&event).unwrap();
        let location = fields.location.unwrap();

        assert_eq!(location.venue, "Town Hall");
        assert_eq!(location.zip, "62704");
        assert_eq!(location.country, "USA");
    }

    #[test]
    fn empty_location_is_not_set() {
        let event = single("DTSTART:20240301T190000\nLOCATION:", 0);
        let fields = EventFields::from_event(&event).unwrap();
        assert!(fields.location.is_none());
    }

    #[test]
    fn post_fields_from_event() {
        let event = single("DTSTART:20240301T190000\nDESCRIPTION:Bring a chair", 0);
        let payload = EventPayload::from_event(&event, Some(CategoryId(4))).unwrap();

        assert_eq!(payload.post.title, "Event");
        assert_eq!(payload.post.content, "Bring a chair");
        assert_eq!(payload.post.category_id, Some(CategoryId(4)));
    }
}
