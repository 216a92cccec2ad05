//! FeedSource trait definition.
//!
//! A [`FeedSource`] retrieves the raw text of an ICS feed. Fetching is the
//! only blocking step of an import, so it is the only async seam; parsing
//! and reconciliation run synchronously on the returned text.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::{ImportError, ImportResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so callers can pick a source at
/// runtime (`&dyn FeedSource`).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieves feed text.
///
/// Implementations must report network failures, non-success responses and
/// empty bodies as errors; the caller treats any error as "feed could not be
/// obtained".
pub trait FeedSource: Send + Sync {
    /// Returns the name of this source (e.g., "http", "file").
    fn name(&self) -> &str;

    /// Fetches the feed at `location` and returns its text.
    fn fetch_text<'a>(&'a self, location: &'a str) -> BoxFuture<'a, ImportResult<String>>;
}

/// Rejects blank feed bodies.
pub(crate) fn non_empty_body(body: String, location: &str) -> ImportResult<String> {
    if body.trim().is_empty() {
        return Err(ImportError::empty_feed(format!(
            "Feed at {} returned no content",
            location
        )));
    }
    Ok(body)
}

/// Reads feeds from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFeedSource;

impl FileFeedSource {
    /// Creates a new file source.
    pub fn new() -> Self {
        Self
    }
}

impl FeedSource for FileFeedSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch_text<'a>(&'a self, location: &'a str) -> BoxFuture<'a, ImportResult<String>> {
        Box::pin(async move {
            debug!(path = %location, "Reading ICS file");
            let body = tokio::fs::read_to_string(location).await.map_err(|e| {
                let err = if e.kind() == std::io::ErrorKind::NotFound {
                    ImportError::not_found(format!("Feed file {} does not exist", location))
                } else {
                    ImportError::internal(format!("Failed to read feed file {}: {}", location, e))
                };
                err.with_origin("file").with_source(e)
            })?;
            non_empty_body(body, location).map_err(|e| e.with_origin("file"))
        })
    }
}

/// A source that always returns an error.
///
/// This is useful for testing or as a placeholder when a source fails to
/// initialize.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: ImportError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: ImportError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl FeedSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_text<'a>(&'a self, _location: &'a str) -> BoxFuture<'a, ImportResult<String>> {
        // ImportError is not Clone; rebuild it from its parts.
        let error = ImportError::new(self.error.code(), self.error.message()).with_origin(&self.name);
        Box::pin(async move { Err(error) })
    }
}

/// A source that serves fixed text, whatever the location.
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    /// Creates a source serving `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl FeedSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_text<'a>(&'a self, location: &'a str) -> BoxFuture<'a, ImportResult<String>> {
        let result = non_empty_body(self.body.clone(), location);
        Box::pin(async move { result })
    }
}
