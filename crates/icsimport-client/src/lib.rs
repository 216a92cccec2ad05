//! CLI, configuration, file-backed store, import reports
//!
//! This crate provides the `icsimport` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod store;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use store::FileStore;
