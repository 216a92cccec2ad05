//! Reconciliation of parsed events against an [`EventStore`].
//!
//! For each event the reconciler decides between create, update, skip and
//! their dry-run counterparts, writes through the store, and folds the
//! outcome into an [`ImportSummary`]. Per-event failures never abort the
//! run; only a feed that cannot be obtained does.

use chrono::Utc;
use icsimport_core::{RawEvent, parse_ics_content};
use tracing::{debug, info, warn};

use crate::error::{ImportError, ImportResult};
use crate::options::ImportOptions;
use crate::outcome::{ImportAction, ImportOutcome, ImportSummary};
use crate::payload::EventPayload;
use crate::source::FeedSource;
use crate::store::{EventStore, RecordId};

const FETCH_FAILED: &str = "Failed to fetch or parse ICS feed";
const MISSING_FIELDS: &str = "Event missing required fields (summary or start date)";

/// Reconciles events into a store, one at a time.
///
/// The store is borrowed mutably for the reconciler's lifetime, so
/// lookup-then-write for one event completes before the next event starts.
pub struct Reconciler<'s, S: EventStore + ?Sized> {
    store: &'s mut S,
    options: ImportOptions,
}

impl<'s, S: EventStore + ?Sized> Reconciler<'s, S> {
    /// Creates a reconciler writing into `store`.
    pub fn new(store: &'s mut S, options: ImportOptions) -> Self {
        Self { store, options }
    }

    /// Reconciles a parsed feed and returns the run summary.
    pub fn reconcile(&mut self, events: &[RawEvent]) -> ImportSummary {
        let mut summary = ImportSummary {
            total_events: events.len(),
            ..ImportSummary::default()
        };
        summary
            .messages
            .push(format!("Found {} events in ICS feed", events.len()));

        let events = match self.options.effective_limit() {
            Some(limit) => {
                summary.messages.push(format!("Limited to {} events", limit));
                &events[..limit.min(events.len())]
            }
            None => events,
        };

        for event in events {
            let outcome = self.reconcile_event(event);
            summary.record(outcome);
        }

        summary.success = true;
        info!(
            store = self.store.name(),
            total = summary.total_events,
            imported = summary.imported,
            updated = summary.updated,
            skipped = summary.skipped,
            dry_run = self.options.dry_run,
            "Import run finished"
        );
        summary
    }

    /// Reconciles a single event.
    pub fn reconcile_event(&mut self, event: &RawEvent) -> ImportOutcome {
        let outcome = self.decide(event);
        if let Some(ref error) = outcome.error {
            warn!(uid = ?event.external_id(), "Skipped event: {}", error);
        }
        outcome
    }

    fn decide(&mut self, event: &RawEvent) -> ImportOutcome {
        let summary = match event.summary.as_deref() {
            Some(summary) if !summary.is_empty() && event.start_epoch().is_some() => summary,
            _ => return ImportOutcome::skipped(MISSING_FIELDS),
        };

        let existing = match event.external_id() {
            Some(uid) => match self.store.find_by_external_id(uid) {
                Ok(found) => found,
                Err(e) => return ImportOutcome::skipped(e.message()),
            },
            None => None,
        };

        if existing.is_some() && !self.options.update_existing {
            return ImportOutcome::skipped(format!(
                "Event \"{}\" already exists (UID: {})",
                summary,
                event.external_id().unwrap_or_default()
            ));
        }

        if self.options.dry_run {
            return match existing {
                Some(_) => ImportOutcome::hypothetical(
                    ImportAction::WouldUpdate,
                    format!("Would update event: {}", summary),
                ),
                None => ImportOutcome::hypothetical(
                    ImportAction::WouldCreate,
                    format!("Would create event: {}", summary),
                ),
            };
        }

        match self.write(event, existing) {
            Ok((action, id)) => {
                let verb = match action {
                    ImportAction::Updated => "Updated",
                    _ => "Created",
                };
                info!(%id, action = %action, "{} event: {}", verb, summary);
                let message = format!("{} event: {} (ID: {})", verb, summary, id);
                ImportOutcome::written(action, id, message)
            }
            Err(e) => ImportOutcome::skipped(e.message()),
        }
    }

    fn write(
        &mut self,
        event: &RawEvent,
        existing: Option<RecordId>,
    ) -> ImportResult<(ImportAction, RecordId)> {
        let category_id = self
            .options
            .category()
            .and_then(|name| self.store.resolve_category(name));

        let payload = EventPayload::from_event(event, category_id)
            .ok_or_else(|| ImportError::internal(MISSING_FIELDS))?;

        let (action, id) = match existing {
            Some(id) => (ImportAction::Updated, self.store.update_record(id, &payload.post)?),
            None => (ImportAction::Created, self.store.create_record(&payload.post)?),
        };
        debug!(%id, "Writing event fields");

        self.store.set_fields(id, &payload.fields)?;
        self.store
            .record_import_metadata(id, event.external_id(), Utc::now())?;

        Ok((action, id))
    }
}

/// Fetches, parses and reconciles a feed in one run.
///
/// A fetch failure yields a failed summary with a single generic error; the
/// cause is logged.
pub async fn import_from_feed<S: EventStore + ?Sized>(
    source: &dyn FeedSource,
    location: &str,
    options: ImportOptions,
    store: &mut S,
) -> ImportSummary {
    let text = match source.fetch_text(location).await {
        Ok(text) => text,
        Err(e) => {
            warn!(source = source.name(), location, "Feed fetch failed: {}", e);
            return ImportSummary::failed(FETCH_FAILED);
        }
    };

    let events = parse_ics_content(&text, store.site_utc_offset_hours());
    debug!(count = events.len(), "Parsed feed");

    Reconciler::new(store, options).reconcile(&events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::payload::{EventFields, PostFields};
    use crate::source::{ErrorSource, StaticSource};
    use crate::store::CategoryId;
    use chrono::DateTime;

    fn feed(events: &[(&str, &str, &str)]) -> String {
        let mut ics = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n");
        for (uid, summary, start) in events {
            ics.push_str("BEGIN:VEVENT\r\n");
            if !uid.is_empty() {
                ics.push_str(&format!("UID:{}\r\n", uid));
            }
            ics.push_str(&format!("SUMMARY:{}\r\n", summary));
            ics.push_str(&format!("DTSTART:{}\r\n", start));
            ics.push_str("END:VEVENT\r\n");
        }
        ics.push_str("END:VCALENDAR\r\n");
        ics
    }

    fn parse(events: &[(&str, &str, &str)]) -> Vec<RawEvent> {
        parse_ics_content(&feed(events), 0)
    }

    /// Counts writes and fails the ones it is told to.
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryStore,
        writes: usize,
        fail_create_for: Option<String>,
        fail_lookup: bool,
        fail_metadata: bool,
    }

    impl EventStore for RecordingStore {
        fn name(&self) -> &str {
            "recording"
        }

        fn find_by_external_id(&self, external_id: &str) -> ImportResult<Option<RecordId>> {
            if self.fail_lookup {
                return Err(ImportError::store("lookup unavailable"));
            }
            self.inner.find_by_external_id(external_id)
        }

        fn create_record(&mut self, post: &PostFields) -> ImportResult<RecordId> {
            if self.fail_create_for.as_deref() == Some(post.title.as_str()) {
                return Err(ImportError::store("Could not insert record"));
            }
            self.writes += 1;
            self.inner.create_record(post)
        }

        fn update_record(&mut self, id: RecordId, post: &PostFields) -> ImportResult<RecordId> {
            self.writes += 1;
            self.inner.update_record(id, post)
        }

        fn set_fields(&mut self, id: RecordId, fields: &EventFields) -> ImportResult<()> {
            self.writes += 1;
            self.inner.set_fields(id, fields)
        }

        fn record_import_metadata(
            &mut self,
            id: RecordId,
            external_id: Option<&str>,
            imported_at: DateTime<Utc>,
        ) -> ImportResult<()> {
            if self.fail_metadata {
                return Err(ImportError::store("Could not save import metadata"));
            }
            self.writes += 1;
            self.inner.record_import_metadata(id, external_id, imported_at)
        }

        fn resolve_category(&self, name: &str) -> Option<CategoryId> {
            self.inner.resolve_category(name)
        }
    }

    #[test]
    fn creates_new_events() {
        let events = parse(&[
            ("a@x", "Opening Night", "20240301T190000"),
            ("b@x", "Matinee", "20240302T140000"),
        ]);
        let mut store = InMemoryStore::new();
        let summary = Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);

        assert!(summary.success);
        assert_eq!(summary.total_events, 2);
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(
            summary.messages,
            vec![
                "Found 2 events in ICS feed",
                "Created event: Opening Night (ID: 1)",
                "Created event: Matinee (ID: 2)",
            ]
        );

        let record = store.get(RecordId(1)).unwrap();
        assert_eq!(record.external_id.as_deref(), Some("a@x"));
        let fields = record.fields.as_ref().unwrap();
        assert_eq!(fields.start_date, "March 1, 2024");
        assert_eq!(fields.start_time, "7:00 pm");
    }

    #[test]
    fn second_run_is_idempotent() {
        let events = parse(&[
            ("a@x", "Opening Night", "20240301T190000"),
            ("b@x", "Matinee", "20240302T140000"),
        ]);
        let mut store = InMemoryStore::new();
        Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);
        let summary = Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);

        assert_eq!(summary.imported, 0);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(
            summary.errors,
            vec![
                "Event \"Opening Night\" already exists (UID: a@x)",
                "Event \"Matinee\" already exists (UID: b@x)",
            ]
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn duplicate_without_update_writes_nothing() {
        let events = parse(&[("a@x", "Opening Night", "20240301T190000")]);
        let mut store = RecordingStore::default();
        Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);
        let writes = store.writes;

        let summary = Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.writes, writes);
    }

    #[test]
    fn update_existing_overwrites_record() {
        let mut store = InMemoryStore::new();
        let first = parse(&[("a@x", "Opening Night", "20240301T190000")]);
        Reconciler::new(&mut store, ImportOptions::new()).reconcile(&first);

        let second = parse(&[("a@x", "Opening Night (moved)", "20240308T190000")]);
        let options = ImportOptions::new().with_update_existing(true);
        let summary = Reconciler::new(&mut store, options).reconcile(&second);

        assert_eq!(summary.updated, 1);
        assert_eq!(summary.imported, 0);
        assert_eq!(
            summary.messages.last().map(String::as_str),
            Some("Updated event: Opening Night (moved) (ID: 1)")
        );
        assert_eq!(store.len(), 1);
        let record = store.get(RecordId(1)).unwrap();
        assert_eq!(record.post.title, "Opening Night (moved)");
        assert_eq!(record.fields.as_ref().unwrap().start_date, "March 8, 2024");
    }

    #[test]
    fn limit_keeps_first_events_in_order() {
        let events = parse(&[
            ("1@x", "One", "20240301T100000"),
            ("2@x", "Two", "20240302T100000"),
            ("3@x", "Three", "20240303T100000"),
            ("4@x", "Four", "20240304T100000"),
            ("5@x", "Five", "20240305T100000"),
        ]);
        let mut store = InMemoryStore::new();
        let summary =
            Reconciler::new(&mut store, ImportOptions::new().with_limit(2)).reconcile(&events);

        assert_eq!(summary.total_events, 5);
        assert_eq!(summary.processed(), 2);
        assert_eq!(summary.messages[1], "Limited to 2 events");
        let titles: Vec<_> = store.records().iter().map(|r| r.post.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn dry_run_never_writes() {
        let events = parse(&[
            ("a@x", "Opening Night", "20240301T190000"),
            ("b@x", "Matinee", "20240302T140000"),
        ]);
        let mut store = RecordingStore::default();
        Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events[..1]);
        let writes = store.writes;

        let options = ImportOptions::new()
            .with_dry_run(true)
            .with_update_existing(true);
        let summary = Reconciler::new(&mut store, options).reconcile(&events);

        assert_eq!(store.writes, writes);
        assert_eq!(summary.imported, 0);
        assert_eq!(summary.updated, 0);
        let actions: Vec<_> = summary.outcomes.iter().map(|o| o.action).collect();
        assert_eq!(actions, vec![ImportAction::WouldUpdate, ImportAction::WouldCreate]);
        assert!(summary.messages.contains(&"Would update event: Opening Night".to_string()));
        assert!(summary.messages.contains(&"Would create event: Matinee".to_string()));
    }

    #[test]
    fn missing_fields_are_skipped() {
        let ics = "BEGIN:VEVENT\nUID:a@x\nDTSTART:20240301T190000\nEND:VEVENT\n\
                   BEGIN:VEVENT\nUID:b@x\nSUMMARY:No start\nEND:VEVENT\n\
                   BEGIN:VEVENT\nUID:c@x\nSUMMARY:Bad start\nDTSTART:soon\nEND:VEVENT\n";
        let events = parse_ics_content(ics, 0);
        let mut store = InMemoryStore::new();
        let summary = Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);

        assert_eq!(summary.skipped, 3);
        assert!(summary.errors.iter().all(|e| e == MISSING_FIELDS));
        assert!(store.is_empty());
    }

    #[test]
    fn store_failure_skips_and_continues() {
        let events = parse(&[
            ("a@x", "Broken", "20240301T190000"),
            ("b@x", "Fine", "20240302T140000"),
        ]);
        let mut store = RecordingStore {
            fail_create_for: Some("Broken".to_string()),
            ..Default::default()
        };
        let summary = Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);

        assert!(summary.success);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.errors, vec!["Could not insert record"]);
        assert_eq!(store.inner.len(), 1);
    }

    #[test]
    fn metadata_failure_keeps_the_created_record() {
        let events = parse(&[
            ("a@x", "Opening Night", "20240301T190000"),
            ("b@x", "Matinee", "20240302T140000"),
        ]);
        let mut store = RecordingStore {
            fail_metadata: true,
            ..Default::default()
        };
        let summary = Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);

        assert!(summary.success);
        assert_eq!(summary.imported, 0);
        assert_eq!(summary.skipped, 2);
        assert!(
            summary
                .outcomes
                .iter()
                .all(|outcome| outcome.action == ImportAction::Skipped)
        );
        assert_eq!(
            summary.errors,
            vec!["Could not save import metadata", "Could not save import metadata"]
        );
        assert_eq!(store.inner.len(), 2);
        assert!(store.inner.get(RecordId(1)).unwrap().fields.is_some());
        assert_eq!(store.inner.find_by_external_id("a@x").unwrap(), None);
    }

    #[test]
    fn lookup_failure_is_per_event() {
        let events = parse(&[("a@x", "Opening Night", "20240301T190000")]);
        let mut store = RecordingStore {
            fail_lookup: true,
            ..Default::default()
        };
        let summary = Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);

        assert!(summary.success);
        assert_eq!(summary.errors, vec!["lookup unavailable"]);
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn events_without_uid_always_create() {
        let events = parse(&[("", "Pop-up Show", "20240301T190000")]);
        let mut store = InMemoryStore::new();
        Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);
        let summary = Reconciler::new(&mut store, ImportOptions::new()).reconcile(&events);

        assert_eq!(summary.imported, 1);
        assert_eq!(store.len(), 2);
        assert!(store.records().iter().all(|r| r.external_id.is_none()));
    }

    #[test]
    fn default_category_is_resolved() {
        let events = parse(&[("a@x", "Opening Night", "20240301T190000")]);
        let mut store = InMemoryStore::new().with_category("Concerts", CategoryId(4));
        let options = ImportOptions::new().with_default_category("Concerts");
        Reconciler::new(&mut store, options).reconcile(&events);

        assert_eq!(store.get(RecordId(1)).unwrap().post.category_id, Some(CategoryId(4)));

        let events = parse(&[("b@x", "Matinee", "20240302T140000")]);
        let options = ImportOptions::new().with_default_category("Unknown");
        Reconciler::new(&mut store, options).reconcile(&events);
        assert_eq!(store.get(RecordId(2)).unwrap().post.category_id, None);
    }

    #[tokio::test]
    async fn import_from_feed_uses_store_offset() {
        let source = StaticSource::new(feed(&[("a@x", "Talk", "20240301T140000Z")]));
        let mut store = InMemoryStore::new().with_site_utc_offset_hours(5);
        let summary =
            import_from_feed(&source, "static", ImportOptions::new(), &mut store).await;

        assert!(summary.success);
        assert_eq!(summary.imported, 1);
        let fields = store.get(RecordId(1)).unwrap().fields.clone().unwrap();
        assert_eq!(fields.start_time, "9:00 am");
    }

    #[tokio::test]
    async fn fetch_failure_fails_the_run() {
        let source = ErrorSource::new("broken", ImportError::network("connection refused"));
        let mut store = InMemoryStore::new();
        let summary =
            import_from_feed(&source, "https://example.com/a.ics", ImportOptions::new(), &mut store)
                .await;

        assert!(!summary.success);
        assert_eq!(summary.errors, vec![FETCH_FAILED]);
        assert_eq!(summary.total_events, 0);
        assert!(summary.outcomes.is_empty());
        assert!(store.is_empty());
    }
}
