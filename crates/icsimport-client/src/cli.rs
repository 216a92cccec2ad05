//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::report::EventListing;

/// icsimport - Import events from an ICS calendar feed
#[derive(Debug, Parser)]
#[command(name = "icsimport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ICSIMPORT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import events from the feed into the event store
    Import {
        #[command(flatten)]
        feed: FeedArgs,

        /// Show what would be imported without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of events to process
        #[arg(long)]
        limit: Option<usize>,

        /// Update events that were imported before
        #[arg(long)]
        update_existing: bool,

        /// Category assigned to imported events
        #[arg(long)]
        category: Option<String>,

        /// Path to the event store file
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Preview the first 50 events without writing anything
    Preview {
        #[command(flatten)]
        feed: FeedArgs,

        /// Path to the event store file
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// List the events parsed from the feed
    Events {
        #[command(flatten)]
        feed: FeedArgs,

        /// Maximum number of events to list
        #[arg(long, default_value_t = EventListing::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Where to read the feed from, overriding the configured URL.
#[derive(Debug, Clone, Default, Args)]
pub struct FeedArgs {
    /// Feed URL (http, https or webcal)
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Local .ics file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
