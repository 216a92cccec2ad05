//! An in-memory [`EventStore`].
//!
//! Used by tests and as the backing state of file-based stores: the whole
//! store is `serde`-serializable.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ImportError, ImportResult};
use crate::payload::{EventFields, PostFields};
use crate::store::{CategoryId, EventStore, RecordId};

/// A stored event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    pub post: PostFields,
    #[serde(default)]
    pub fields: Option<EventFields>,
    /// The UID this record was imported under.
    #[serde(default)]
    pub external_id: Option<String>,
    /// When the record was last written by an import.
    #[serde(default)]
    pub last_import: Option<DateTime<Utc>>,
}

/// An event store kept entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryStore {
    records: Vec<StoredRecord>,
    categories: BTreeMap<String, CategoryId>,
    next_id: u64,
    site_utc_offset_hours: i32,
}

impl InMemoryStore {
    /// Creates an empty store with a zero site offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the site UTC offset.
    pub fn with_site_utc_offset_hours(mut self, hours: i32) -> Self {
        self.site_utc_offset_hours = hours;
        self
    }

    /// Builder method to register a category.
    pub fn with_category(mut self, name: impl Into<String>, id: CategoryId) -> Self {
        self.categories.insert(name.into(), id);
        self
    }

    /// Sets the site UTC offset.
    pub fn set_site_utc_offset_hours(&mut self, hours: i32) {
        self.site_utc_offset_hours = hours;
    }

    /// Returns all records in creation order.
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Returns a record by identifier.
    pub fn get(&self, id: RecordId) -> Option<&StoredRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn get_mut(&mut self, id: RecordId) -> ImportResult<&mut StoredRecord> {
        self.records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| {
                ImportError::store(format!("Record {} does not exist", id)).with_origin("memory")
            })
    }
}

impl EventStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn find_by_external_id(&self, external_id: &str) -> ImportResult<Option<RecordId>> {
        Ok(self
            .records
            .iter()
            .find(|record| record.external_id.as_deref() == Some(external_id))
            .map(|record| record.id))
    }

    fn create_record(&mut self, post: &PostFields) -> ImportResult<RecordId> {
        self.next_id += 1;
        let id = RecordId(self.next_id);
        self.records.push(StoredRecord {
            id,
            post: post.clone(),
            fields: None,
            external_id: None,
            last_import: None,
        });
        trace!(%id, title = %post.title, "Created record");
        Ok(id)
    }

    fn update_record(&mut self, id: RecordId, post: &PostFields) -> ImportResult<RecordId> {
        let record = self.get_mut(id)?;
        record.post = post.clone();
        trace!(%id, title = %post.title, "Updated record");
        Ok(id)
    }

    fn set_fields(&mut self, id: RecordId, fields: &EventFields) -> ImportResult<()> {
        self.get_mut(id)?.fields = Some(fields.clone());
        Ok(())
    }

    fn record_import_metadata(
        &mut self,
        id: RecordId,
        external_id: Option<&str>,
        imported_at: DateTime<Utc>,
    ) -> ImportResult<()> {
        let record = self.get_mut(id)?;
        record.external_id = external_id.map(str::to_string);
        record.last_import = Some(imported_at);
        Ok(())
    }

    fn resolve_category(&self, name: &str) -> Option<CategoryId> {
        self.categories.get(name).copied()
    }

    fn site_utc_offset_hours(&self) -> i32 {
        self.site_utc_offset_hours
    }
}
