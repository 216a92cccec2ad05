//! Client error types.

use std::fmt;

use icsimport_importer::ImportError;

use crate::store::StoreFileError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Feed source or import error.
    Import(String),
    /// IO error.
    Io(std::io::Error),
    /// Event store file error.
    Store(StoreFileError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Import(msg) => write!(f, "import error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Store(err) => write!(f, "store error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<StoreFileError> for ClientError {
    fn from(err: StoreFileError) -> Self {
        Self::Store(err)
    }
}

impl From<ImportError> for ClientError {
    fn from(err: ImportError) -> Self {
        Self::Import(err.to_string())
    }
}
