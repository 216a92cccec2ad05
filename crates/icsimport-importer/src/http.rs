//! HTTP feed source.
//!
//! Fetches ICS feeds over HTTP(S) with a single GET. Non-success statuses
//! and empty bodies are errors.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, trace};
use url::Url;

use crate::error::{ImportError, ImportResult};
use crate::source::{BoxFuture, FeedSource, non_empty_body};

/// Configuration for the HTTP feed source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Whether to verify TLS certificates.
    pub verify_tls: bool,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl HttpSourceConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self {
            verify_tls: true,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("icsimport/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Disables TLS verification (for testing only).
    pub fn with_insecure_tls(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses and checks a feed URL.
///
/// `webcal://` is accepted as an alias for `https://`, as calendar
/// subscription links commonly use it.
pub fn parse_feed_url(location: &str) -> ImportResult<Url> {
    let location = location.trim();
    let normalized = match location.strip_prefix("webcal://") {
        Some(rest) => format!("https://{}", rest),
        None => location.to_string(),
    };

    let url = Url::parse(&normalized).map_err(|e| {
        ImportError::invalid_location(format!("Invalid feed URL {}: {}", location, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ImportError::invalid_location(format!(
            "Unsupported feed URL scheme: {}",
            other
        ))),
    }
}

/// Fetches feeds over HTTP(S).
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    /// Creates a new HTTP source with the given configuration.
    pub fn new(config: HttpSourceConfig) -> ImportResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ImportError::network(format!("Failed to create HTTP client: {}", e))
                    .with_origin("http")
            })?;

        Ok(Self { client })
    }

    async fn get(&self, location: &str) -> ImportResult<String> {
        let url = parse_feed_url(location)?;
        debug!(url = %url, "Fetching ICS feed");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            ImportError::network(format!("Request to {} failed: {}", url, e)).with_source(e)
        })?;

        let status = response.status();
        trace!(status = %status, "Received response");
        check_status(status, &url)?;

        let body = response.text().await.map_err(|e| {
            ImportError::network(format!("Failed to read response body: {}", e)).with_source(e)
        })?;

        non_empty_body(body, url.as_str())
    }
}

/// Maps a non-success status to an error.
fn check_status(status: StatusCode, url: &Url) -> ImportResult<()> {
    if status.is_success() {
        return Ok(());
    }

    let message = format!("Feed request to {} returned HTTP {}", url, status);
    Err(match status {
        StatusCode::NOT_FOUND => ImportError::not_found(message),
        s if s.is_server_error() => ImportError::server(message),
        _ => ImportError::http(message),
    })
}

impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_text<'a>(&'a self, location: &'a str) -> BoxFuture<'a, ImportResult<String>> {
        Box::pin(async move { self.get(location).await.map_err(|e| e.with_origin("http")) })
    }
}
