//! Per-event outcomes and the aggregate run summary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::RecordId;

/// What happened to one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    Created,
    Updated,
    WouldCreate,
    WouldUpdate,
    Skipped,
}

impl ImportAction {
    /// Returns true for every action except [`ImportAction::Skipped`].
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Skipped)
    }

    /// Returns a machine-readable name for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::WouldCreate => "would_create",
            Self::WouldUpdate => "would_update",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ImportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of reconciling one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub action: ImportAction,
    /// The record written, for created and updated events.
    pub target_id: Option<RecordId>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ImportOutcome {
    /// A successful write.
    pub fn written(action: ImportAction, target_id: RecordId, message: impl Into<String>) -> Self {
        Self {
            action,
            target_id: Some(target_id),
            message: Some(message.into()),
            error: None,
        }
    }

    /// A dry-run decision.
    pub fn hypothetical(action: ImportAction, message: impl Into<String>) -> Self {
        Self {
            action,
            target_id: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// A skipped event with the reason.
    pub fn skipped(error: impl Into<String>) -> Self {
        Self {
            action: ImportAction::Skipped,
            target_id: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// The aggregate result of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// False only when the feed could not be obtained.
    pub success: bool,
    /// Number of events in the feed, before any limit.
    pub total_events: usize,
    pub imported: usize,
    pub updated: usize,
    pub skipped: usize,
    pub messages: Vec<String>,
    pub errors: Vec<String>,
    /// Per-event outcomes in processing order.
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportSummary {
    /// Creates a summary for a run whose feed could not be obtained.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Self::default()
        }
    }

    /// Folds one event outcome into the counters and message lists.
    pub fn record(&mut self, outcome: ImportOutcome) {
        match outcome.action {
            ImportAction::Created => self.imported += 1,
            ImportAction::Updated => self.updated += 1,
            ImportAction::WouldCreate | ImportAction::WouldUpdate => {}
            ImportAction::Skipped => self.skipped += 1,
        }

        if outcome.action.is_success() {
            self.messages.extend(outcome.message.iter().cloned());
        } else {
            self.errors.extend(outcome.error.iter().cloned());
        }

        self.outcomes.push(outcome);
    }

    /// Returns the number of events that went through reconciliation.
    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }
}
