//! Import reconciliation for ICS feeds.
//!
//! This crate takes the events parsed by `icsimport-core` and reconciles
//! them into a host event store:
//!
//! - [`FeedSource`] - Obtains feed text (HTTP, local file)
//! - [`EventStore`] - The host store the reconciler reads and writes
//! - [`Reconciler`] - Per-event create/update/skip decisions
//! - [`ImportSummary`] - Aggregate counters and messages of a run
//! - [`ImportError`] - Error types for sources and stores
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │  HTTP(S) feed   │    │   .ics file     │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐    ┌─────────────────┐
//! │ HttpFeedSource  │    │ FileFeedSource  │
//! └────────┬────────┘    └────────┬────────┘
//!          │      FeedSource      │
//!          └──────────┬───────────┘
//!                     ▼ parse_ics_content()
//!              ┌─────────────┐
//!              │  RawEvent   │
//!              └──────┬──────┘
//!                     ▼ Reconciler
//!              ┌─────────────┐
//!              │ EventStore  │
//!              └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use icsimport_importer::{import_from_feed, FileFeedSource, ImportOptions, InMemoryStore};
//!
//! async fn run() {
//!     let mut store = InMemoryStore::new();
//!     let summary =
//!         import_from_feed(&FileFeedSource::new(), "events.ics", ImportOptions::new(), &mut store)
//!             .await;
//!     println!("{} imported", summary.imported);
//! }
//! ```

pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod location;
pub mod memory;
pub mod options;
pub mod outcome;
pub mod payload;
pub mod reconcile;
pub mod source;
pub mod store;

// Re-export main types at crate root
pub use error::{ImportError, ImportErrorCode, ImportResult};
#[cfg(feature = "http")]
pub use http::{HttpFeedSource, HttpSourceConfig, parse_feed_url};
pub use location::{LocationParts, parse_location};
pub use memory::{InMemoryStore, StoredRecord};
pub use options::ImportOptions;
pub use outcome::{ImportAction, ImportOutcome, ImportSummary};
pub use payload::{EventFields, EventPayload, PostFields};
pub use reconcile::{Reconciler, import_from_feed};
pub use source::{BoxFuture, ErrorSource, FeedSource, FileFeedSource, StaticSource};
pub use store::{CategoryId, EventStore, RecordId};
