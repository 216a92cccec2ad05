//! The target content store.
//!
//! [`EventStore`] is the narrow interface through which the reconciler
//! reads and writes the host system's event records. The reconciler borrows
//! the store mutably for a whole run, so lookups and writes for different
//! events can never interleave.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ImportResult;
use crate::payload::{EventFields, PostFields};

/// Identifier of a record in the target store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a category (taxonomy term) in the target store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The host system's event storage.
///
/// # Implementation Notes
///
/// - Lookups are scoped to event records only
/// - `record_import_metadata` must make the record findable by
///   `find_by_external_id` afterwards, which is what keeps repeated
///   imports idempotent
/// - If several importers may run against the same store at once, the
///   implementation is responsible for making lookup-then-write atomic
///   per external identifier
pub trait EventStore {
    /// Returns the name of this store (e.g., "memory", "json-file").
    fn name(&self) -> &str;

    /// Finds the record previously imported under the given UID.
    fn find_by_external_id(&self, external_id: &str) -> ImportResult<Option<RecordId>>;

    /// Creates a record and returns its identifier.
    fn create_record(&mut self, post: &PostFields) -> ImportResult<RecordId>;

    /// Replaces the post fields of an existing record.
    fn update_record(&mut self, id: RecordId, post: &PostFields) -> ImportResult<RecordId>;

    /// Applies the structured event fields to a record.
    fn set_fields(&mut self, id: RecordId, fields: &EventFields) -> ImportResult<()>;

    /// Stores the UID and import time against a record.
    fn record_import_metadata(
        &mut self,
        id: RecordId,
        external_id: Option<&str>,
        imported_at: DateTime<Utc>,
    ) -> ImportResult<()>;

    /// Resolves a category name to its identifier.
    fn resolve_category(&self, name: &str) -> Option<CategoryId>;

    /// Returns the site's configured UTC offset in whole hours.
    fn site_utc_offset_hours(&self) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&RecordId(42)).unwrap(), "42");
        assert_eq!(serde_json::from_str::<CategoryId>("7").unwrap(), CategoryId(7));
    }

    #[test]
    fn ids_display_as_numbers() {
        assert_eq!(RecordId(12).to_string(), "12");
        assert_eq!(CategoryId(3).to_string(), "3");
    }
}
