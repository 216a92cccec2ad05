//! Options controlling a single import run.

use serde::{Deserialize, Serialize};

/// Options for an import run.
///
/// Host configuration (update policy, default category) is passed in here
/// for each run rather than read from global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Overwrite records whose UID was imported before.
    pub update_existing: bool,
    /// Category name to assign to created and updated records.
    pub default_category: Option<String>,
    /// Compute outcomes without writing to the store.
    pub dry_run: bool,
    /// Maximum number of events to process. `None` or `0` means unlimited.
    pub limit: Option<usize>,
}

impl ImportOptions {
    /// Number of events a preview run looks at.
    pub const PREVIEW_LIMIT: usize = 50;

    /// Creates new import options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for a preview: a dry run over the first
    /// [`Self::PREVIEW_LIMIT`] events.
    pub fn preview() -> Self {
        Self::new()
            .with_dry_run(true)
            .with_limit(Self::PREVIEW_LIMIT)
    }

    /// Builder method to allow updating existing records.
    pub fn with_update_existing(mut self, update_existing: bool) -> Self {
        self.update_existing = update_existing;
        self
    }

    /// Builder method to set the default category.
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = Some(category.into());
        self
    }

    /// Builder method to enable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builder method to set the event limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the limit when one is set and positive.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|&limit| limit > 0)
    }

    /// Returns the default category when it is set and non-blank.
    pub fn category(&self) -> Option<&str> {
        self.default_category
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let options = ImportOptions::new();
        assert!(!options.update_existing);
        assert!(!options.dry_run);
        assert!(options.effective_limit().is_none());
        assert!(options.category().is_none());
    }

    #[test]
    fn zero_limit_is_unlimited() {
        assert!(ImportOptions::new().with_limit(0).effective_limit().is_none());
        assert_eq!(ImportOptions::new().with_limit(3).effective_limit(), Some(3));
    }

    #[test]
    fn preview_is_limited_dry_run() {
        let options = ImportOptions::preview();
        assert!(options.dry_run);
        assert_eq!(options.effective_limit(), Some(50));
    }

    #[test]
    fn blank_category_is_ignored() {
        let options = ImportOptions::new().with_default_category("  ");
        assert!(options.category().is_none());

        let options = ImportOptions::new().with_default_category(" Concerts ");
        assert_eq!(options.category(), Some("Concerts"));
    }

    #[test]
    fn deserializes_partial_options() {
        let options: ImportOptions = serde_json::from_str(r#"{"dry_run": true}"#).unwrap();
        assert!(options.dry_run);
        assert!(!options.update_existing);
        assert!(options.limit.is_none());
    }
}
