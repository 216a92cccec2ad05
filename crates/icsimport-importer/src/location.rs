//! Decomposition of free-form location strings.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `State ZIP` or `State ZIP+4`, e.g. `IL 62704` or `New York 10001-1234`.
static STATE_ZIP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+([0-9]{5}(-[0-9]{4})?)$").expect("Invalid state/zip regex")
});

/// The address components of an event location.
///
/// Missing components are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationParts {
    pub venue: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Splits `Venue, Address, City, State ZIP, Country` into its parts.
///
/// Segments are comma-separated and trimmed. Fewer segments leave the later
/// fields empty; extra segments are ignored. When the fourth segment does not
/// end in a ZIP code it is taken as the state.
pub fn parse_location(location: &str) -> LocationParts {
    let segments: Vec<&str> = location.split(',').map(str::trim).collect();
    let segment = |index: usize| segments.get(index).copied().unwrap_or_default().to_string();

    let (state, zip) = match segments.get(3) {
        Some(state_zip) => match STATE_ZIP_REGEX.captures(state_zip) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string()),
            None => (state_zip.to_string(), String::new()),
        },
        None => (String::new(), String::new()),
    };

    LocationParts {
        venue: segment(0),
        address: segment(1),
        city: segment(2),
        state,
        zip,
        country: segment(4),
    }
}
