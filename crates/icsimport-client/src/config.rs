//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/icsimport/config.toml` by default. Command-line flags override
//! these values for a single run.

use std::path::{Path, PathBuf};

use icsimport_importer::{ImportOptions, parse_feed_url};
use serde::{Deserialize, Serialize};

/// Configuration for the icsimport client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Feed settings.
    pub feed: FeedSettings,

    /// Import policy settings.
    pub import: ImportSettings,

    /// Event store settings.
    pub store: StoreSettings,
}

/// Where the feed comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// The ICS feed URL.
    pub url: Option<String>,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout: 30,
        }
    }
}

/// How feed events are written to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Category assigned to imported events.
    pub default_category: Option<String>,

    /// Overwrite previously imported events.
    pub update_existing: bool,

    /// Whole-hour offset of the site's local time from UTC.
    pub site_utc_offset_hours: i32,
}

/// Event store settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the JSON event store.
    pub path: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("icsimport")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("icsimport")
    }

    /// Returns the configured store path, or the default one.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join("events.json"))
    }

    /// Builds import options from the `[import]` section.
    pub fn import_options(&self) -> ImportOptions {
        let mut options = ImportOptions::new().with_update_existing(self.import.update_existing);
        if let Some(ref category) = self.import.default_category {
            options = options.with_default_category(category);
        }
        options
    }

    /// Checks the values that cannot be checked by deserialization alone.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref url) = self.feed.url {
            parse_feed_url(url).map_err(|e| e.message().to_string())?;
        }

        if self.feed.timeout == 0 {
            return Err("feed timeout must be greater than zero".to_string());
        }

        if !(-12..=14).contains(&self.import.site_utc_offset_hours) {
            return Err(format!(
                "site_utc_offset_hours must be between -12 and 14, got {}",
                self.import.site_utc_offset_hours
            ));
        }

        Ok(())
    }
}
