//! Import and preview commands.

use std::path::PathBuf;

use icsimport_importer::{ImportOptions, ImportSummary, import_from_feed};
use tracing::info;

use crate::cli::FeedArgs;
use crate::commands::feed_source;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::report::ImportReport;
use crate::store::FileStore;

/// Flag overrides for an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportOverrides {
    pub dry_run: bool,
    pub limit: Option<usize>,
    pub update_existing: bool,
    pub category: Option<String>,
    pub store: Option<PathBuf>,
}

impl ImportOverrides {
    /// Applies the flags on top of the configured options.
    pub fn apply(&self, mut options: ImportOptions) -> ImportOptions {
        if self.dry_run {
            options = options.with_dry_run(true);
        }
        if let Some(limit) = self.limit {
            options = options.with_limit(limit);
        }
        if self.update_existing {
            options = options.with_update_existing(true);
        }
        if let Some(ref category) = self.category {
            options = options.with_default_category(category);
        }
        options
    }
}

/// Imports the feed into the store and prints the report.
pub async fn import(
    config: &ClientConfig,
    feed: &FeedArgs,
    overrides: &ImportOverrides,
) -> ClientResult<()> {
    let options = overrides.apply(config.import_options());
    let store_path = overrides.store.clone().unwrap_or_else(|| config.store_path());
    let summary = run(config, feed, options, store_path).await?;

    if summary.dry_run {
        print!("{}", ImportReport::preview(&summary.summary));
    } else {
        print!("{}", ImportReport::import(&summary.summary));
    }
    finish(&summary.summary)
}

/// Previews the first events of the feed without writing anything.
pub async fn preview(
    config: &ClientConfig,
    feed: &FeedArgs,
    store: Option<PathBuf>,
) -> ClientResult<()> {
    let configured = config.import_options();
    let options = ImportOptions {
        update_existing: configured.update_existing,
        default_category: configured.default_category,
        ..ImportOptions::preview()
    };
    let store_path = store.unwrap_or_else(|| config.store_path());
    let summary = run(config, feed, options, store_path).await?;

    print!("{}", ImportReport::preview(&summary.summary));
    finish(&summary.summary)
}

/// The summary of a run and whether it was a dry run.
pub struct RunResult {
    pub summary: ImportSummary,
    pub dry_run: bool,
}

/// Runs one import against the file store at `store_path`.
///
/// The store is saved only after a successful run that was not a dry run.
pub async fn run(
    config: &ClientConfig,
    feed: &FeedArgs,
    options: ImportOptions,
    store_path: PathBuf,
) -> ClientResult<RunResult> {
    let (source, location) = feed_source(config, feed)?;
    let mut store =
        FileStore::open(store_path)?.with_site_utc_offset_hours(config.import.site_utc_offset_hours);

    let dry_run = options.dry_run;
    info!(location = %location, dry_run, "Starting import");
    let summary = import_from_feed(source.as_ref(), &location, options, &mut store).await;

    if summary.success && !dry_run {
        store.save()?;
    }

    Ok(RunResult { summary, dry_run })
}

fn finish(summary: &ImportSummary) -> ClientResult<()> {
    if summary.success {
        Ok(())
    } else {
        Err(ClientError::Import(summary.errors.join("; ")))
    }
}
