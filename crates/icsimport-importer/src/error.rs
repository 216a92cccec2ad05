//! Error types for feed fetching and store operations.
//!
//! Only two kinds of failure reach the caller of an import run: a feed that
//! cannot be obtained (fatal to the run) and per-event store failures (which
//! become skipped outcomes). Both are represented by [`ImportError`].

use std::fmt;
use thiserror::Error;

/// The category of an import error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportErrorCode {
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// The feed server answered 5xx.
    ServerError,
    /// The feed server answered with another non-success status.
    HttpError,
    /// The feed was fetched but its body was empty.
    EmptyFeed,
    /// The feed location is not a valid URL or path.
    InvalidLocation,
    /// Resource not found (404, missing file).
    NotFound,
    /// The target store rejected a lookup or write.
    StoreError,
    /// Internal error - unexpected state, bug.
    InternalError,
}

impl ImportErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::ServerError)
    }

    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::ServerError => "server_error",
            Self::HttpError => "http_error",
            Self::EmptyFeed => "empty_feed",
            Self::InvalidLocation => "invalid_location",
            Self::NotFound => "not_found",
            Self::StoreError => "store_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ImportErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised by a feed source or an event store.
#[derive(Debug, Error)]
pub struct ImportError {
    /// The error code categorizing this error.
    code: ImportErrorCode,
    /// A plain-text message describing the error.
    message: String,
    /// The collaborator that generated this error (e.g., "http", "memory").
    origin: Option<String>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ImportError {
    /// Creates a new import error with the given code and message.
    pub fn new(code: ImportErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            origin: None,
            source: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ImportErrorCode::NetworkError, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ImportErrorCode::ServerError, message)
    }

    /// Creates an HTTP status error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::new(ImportErrorCode::HttpError, message)
    }

    /// Creates an empty feed error.
    pub fn empty_feed(message: impl Into<String>) -> Self {
        Self::new(ImportErrorCode::EmptyFeed, message)
    }

    /// Creates an invalid location error.
    pub fn invalid_location(message: impl Into<String>) -> Self {
        Self::new(ImportErrorCode::InvalidLocation, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ImportErrorCode::NotFound, message)
    }

    /// Creates a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ImportErrorCode::StoreError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ImportErrorCode::InternalError, message)
    }

    /// Sets the originating collaborator for this error.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ImportErrorCode {
        self.code
    }

    /// Returns the plain-text message, without code or origin.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the originating collaborator, if set.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref origin) = self.origin {
            write!(f, "[{}] ", origin)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for import collaborators.
pub type ImportResult<T> = Result<T, ImportError>;
