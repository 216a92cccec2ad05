//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;

    match config.feed.url {
        Some(ref url) => println!("Feed URL: {}", url),
        None => println!("No feed URL configured; pass --url or --file when importing."),
    }
    println!("Event store: {}", config.store_path().display());
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    println!("config: {}", ClientConfig::default_path().display());
    println!("store: {}", ClientConfig::default_data_dir().join("events.json").display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_output_parses_back() {
        let mut config = ClientConfig::default();
        config.feed.url = Some("https://example.com/a.ics".to_string());
        config.import.site_utc_offset_hours = -5;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn validate_reports_config_errors() {
        let mut config = ClientConfig::default();
        config.feed.timeout = 0;

        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
