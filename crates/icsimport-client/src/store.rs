//! JSON-file backed event store.
//!
//! The whole [`InMemoryStore`] is loaded at the start of a run and written
//! back at the end, so repeated imports see the UIDs of earlier ones.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use icsimport_importer::{
    CategoryId, EventFields, EventStore, ImportResult, InMemoryStore, PostFields, RecordId,
};
use thiserror::Error;
use tracing::debug;

/// Errors reading or writing the store file.
#[derive(Debug, Error)]
pub enum StoreFileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// An [`InMemoryStore`] persisted as a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreFileError> {
        let path = path.into();
        let inner = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                StoreFileError::Parse {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => InMemoryStore::new(),
            Err(source) => {
                return Err(StoreFileError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };

        debug!(path = %path.display(), records = inner.len(), "Opened event store");
        Ok(Self { path, inner })
    }

    /// Builder method to set the site UTC offset.
    pub fn with_site_utc_offset_hours(mut self, hours: i32) -> Self {
        self.inner.set_site_utc_offset_hours(hours);
        self
    }

    /// Returns the in-memory state.
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    /// Writes the store back to its file, creating parent directories.
    pub fn save(&self) -> Result<(), StoreFileError> {
        let json = serde_json::to_string_pretty(&self.inner)?;

        let write_error = |source: std::io::Error| StoreFileError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(&self.path, json).map_err(write_error)?;

        debug!(path = %self.path.display(), records = self.inner.len(), "Saved event store");
        Ok(())
    }
}

impl EventStore for FileStore {
    fn name(&self) -> &str {
        "json-file"
    }

    fn find_by_external_id(&self, external_id: &str) -> ImportResult<Option<RecordId>> {
        self.inner.find_by_external_id(external_id)
    }

    fn create_record(&mut self, post: &PostFields) -> ImportResult<RecordId> {
        self.inner.create_record(post)
    }

    fn update_record(&mut self, id: RecordId, post: &PostFields) -> ImportResult<RecordId> {
        self.inner.update_record(id, post)
    }

    fn set_fields(&mut self, id: RecordId, fields: &EventFields) -> ImportResult<()> {
        self.inner.set_fields(id, fields)
    }

    fn record_import_metadata(
        &mut self,
        id: RecordId,
        external_id: Option<&str>,
        imported_at: DateTime<Utc>,
    ) -> ImportResult<()> {
        self.inner
            .record_import_metadata(id, external_id, imported_at)
    }

    fn resolve_category(&self, name: &str) -> Option<CategoryId> {
        self.inner.resolve_category(name)
    }

    fn site_utc_offset_hours(&self) -> i32 {
        self.inner.site_utc_offset_hours()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> PostFields {
        PostFields {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("events.json")).unwrap();
        assert!(store.inner().is_empty());
    }

    #[test]
    fn save_and_reopen_keeps_uids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.json");

        let mut store = FileStore::open(&path).unwrap();
        let id = store.create_record(&post("Opening Night")).unwrap();
        store
            .record_import_metadata(id, Some("a@x"), Utc::now())
            .unwrap();
        store.save().unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.find_by_external_id("a@x").unwrap(), Some(id));
        assert_eq!(reopened.inner().get(id).unwrap().post.title, "Opening Night");
    }

    #[test]
    fn offset_comes_from_builder() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("events.json"))
            .unwrap()
            .with_site_utc_offset_hours(-5);
        assert_eq!(store.site_utc_offset_hours(), -5);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreFileError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
