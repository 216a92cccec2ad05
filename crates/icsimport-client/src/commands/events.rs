//! Event listing command.

use icsimport_core::parse_ics_content;

use crate::cli::FeedArgs;
use crate::commands::feed_source;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::report::EventListing;

/// Fetches and parses the feed, then lists its first `limit` events.
pub async fn list(config: &ClientConfig, feed: &FeedArgs, limit: usize) -> ClientResult<()> {
    let (source, location) = feed_source(config, feed)?;
    let text = source.fetch_text(&location).await?;
    let events = parse_ics_content(&text, config.import.site_utc_offset_hours);

    print!("{}", EventListing::new(&events, limit));
    Ok(())
}
