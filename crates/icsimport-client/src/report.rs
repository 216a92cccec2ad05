//! Text rendering of import summaries and parsed events.

use std::fmt;

use icsimport_core::{EventKind, RawEvent, RawEventTime};
use icsimport_importer::{ImportAction, ImportSummary};

/// Number of messages shown in a preview before eliding the rest.
pub const PREVIEW_SAMPLE: usize = 10;

/// Number of characters of a description shown in an event listing.
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// The outcome of an import or preview run, ready for printing.
pub struct ImportReport<'a> {
    summary: &'a ImportSummary,
    preview: bool,
}

impl<'a> ImportReport<'a> {
    /// Report for a run that wrote to the store.
    pub fn import(summary: &'a ImportSummary) -> Self {
        Self {
            summary,
            preview: false,
        }
    }

    /// Report for a dry run.
    pub fn preview(summary: &'a ImportSummary) -> Self {
        Self {
            summary,
            preview: true,
        }
    }

    fn count(&self, action: ImportAction) -> usize {
        self.summary
            .outcomes
            .iter()
            .filter(|outcome| outcome.action == action)
            .count()
    }
}

impl fmt::Display for ImportReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;

        if !summary.success {
            writeln!(f, "Import failed")?;
            return write_list(f, "Errors", &summary.errors, None);
        }

        if self.preview {
            writeln!(f, "Preview Results")?;
            writeln!(f, "  Total Events Found: {}", summary.total_events)?;
            writeln!(f, "  Would Import: {}", self.count(ImportAction::WouldCreate))?;
            writeln!(f, "  Would Update: {}", self.count(ImportAction::WouldUpdate))?;
            writeln!(f, "  Would Skip: {}", summary.skipped)?;
            write_list(f, "Sample Events", &summary.messages, Some(PREVIEW_SAMPLE))?;
        } else {
            writeln!(f, "Import Results")?;
            writeln!(f, "  Total Events: {}", summary.total_events)?;
            writeln!(f, "  Imported: {}", summary.imported)?;
            writeln!(f, "  Updated: {}", summary.updated)?;
            writeln!(f, "  Skipped: {}", summary.skipped)?;
            write_list(f, "Messages", &summary.messages, None)?;
        }

        write_list(f, "Errors", &summary.errors, None)
    }
}

fn write_list(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    items: &[String],
    max: Option<usize>,
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(f, "{}:", heading)?;
    let shown = max.unwrap_or(items.len()).min(items.len());
    for item in &items[..shown] {
        writeln!(f, "  - {}", item)?;
    }
    if items.len() > shown {
        writeln!(f, "  ... and {} more", items.len() - shown)?;
    }
    Ok(())
}

/// A listing of parsed events with their raw times and kind.
pub struct EventListing<'a> {
    events: &'a [RawEvent],
    limit: usize,
}

impl<'a> EventListing<'a> {
    /// Default number of events listed.
    pub const DEFAULT_LIMIT: usize = 10;

    /// Lists at most `limit` events.
    pub fn new(events: &'a [RawEvent], limit: usize) -> Self {
        Self { events, limit }
    }
}

impl fmt::Display for EventListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} events", self.events.len())?;

        for (i, event) in self.events.iter().take(self.limit).enumerate() {
            let raw = |time: Option<&RawEventTime>, missing: &'static str| {
                time.map_or(missing, |t| t.raw.as_str()).to_string()
            };

            writeln!(f)?;
            writeln!(f, "Event {}:", i + 1)?;
            writeln!(f, "  Title: {}", event.effective_title())?;
            writeln!(f, "  Start: {}", raw(event.dtstart.as_ref(), "No start"))?;
            writeln!(f, "  End: {}", raw(event.dtend.as_ref(), "No end"))?;
            writeln!(f, "  Type: {}", EventKind::of(event))?;
            writeln!(
                f,
                "  Location: {}",
                event.location.as_deref().unwrap_or("No location")
            )?;
            if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
                let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
                let ellipsis = if preview.len() < description.len() { "..." } else { "" };
                writeln!(f, "  Description: {}{}", preview, ellipsis)?;
            }
        }

        if self.events.len() > self.limit {
            writeln!(f)?;
            writeln!(f, "... and {} more", self.events.len() - self.limit)?;
        }
        Ok(())
    }
}
