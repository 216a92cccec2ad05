//! Command implementations.

pub mod config;
pub mod events;
pub mod import;

use std::time::Duration;

use icsimport_importer::{FeedSource, FileFeedSource, HttpFeedSource, HttpSourceConfig};

use crate::cli::FeedArgs;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Picks the feed source and location for a run.
///
/// `--file` wins over `--url`, which wins over the configured URL.
pub fn feed_source(
    config: &ClientConfig,
    args: &FeedArgs,
) -> ClientResult<(Box<dyn FeedSource>, String)> {
    if let Some(ref file) = args.file {
        return Ok((
            Box::new(FileFeedSource::new()),
            file.to_string_lossy().into_owned(),
        ));
    }

    let url = args
        .url
        .clone()
        .or_else(|| config.feed.url.clone())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ClientError::Config("No feed URL configured".to_string()))?;

    let http_config =
        HttpSourceConfig::new().with_timeout(Duration::from_secs(config.feed.timeout));
    Ok((Box::new(HttpFeedSource::new(http_config)?), url))
}
