//! Export run state tracking.

use std::fmt;

use crate::download::persist::PersistOutcome;
use crate::error::{Error, Result};

/// Phase of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    NotStarted,
    FetchingFirstPage,
    FetchingRemainingPages,
    /// Resolving one listing record into a coub.
    ResolvingItems,
    /// Saving the coub that was just resolved.
    PersistingItems,
    Done,
    /// A listing page could not be fetched.
    Aborted,
    /// The cancellation token fired.
    Cancelled,
}

impl ExportPhase {
    /// Whether the run can leave this phase.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExportPhase::Done | ExportPhase::Aborted | ExportPhase::Cancelled
        )
    }

    /// Whether `next` may follow this phase.
    pub fn can_transition_to(&self, next: ExportPhase) -> bool {
        use ExportPhase::*;

        if next == Cancelled {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (NotStarted, FetchingFirstPage)
                | (FetchingFirstPage, FetchingRemainingPages)
                | (FetchingFirstPage, Aborted)
                | (FetchingRemainingPages, ResolvingItems)
                | (FetchingRemainingPages, Aborted)
                | (FetchingRemainingPages, Done)
                | (ResolvingItems, PersistingItems)
                | (ResolvingItems, Done)
                | (PersistingItems, ResolvingItems)
                | (PersistingItems, Done)
        )
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportPhase::NotStarted => write!(f, "not started"),
            ExportPhase::FetchingFirstPage => write!(f, "fetching page 1"),
            ExportPhase::FetchingRemainingPages => write!(f, "fetching remaining pages"),
            ExportPhase::ResolvingItems => write!(f, "resolving items"),
            ExportPhase::PersistingItems => write!(f, "saving items"),
            ExportPhase::Done => write!(f, "done"),
            ExportPhase::Aborted => write!(f, "aborted"),
            ExportPhase::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Counters for one export run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportStats {
    pub total_pages: u32,
    pub items_found: u64,
    pub items_skipped: u64,
    pub items_exported: u64,
    pub items_failed: u64,
    pub audio_files: u64,
    pub video_files: u64,
}

impl ExportStats {
    /// A record could not be resolved.
    pub fn record_skipped(&mut self) {
        self.items_skipped += 1;
    }

    /// An item was saved.
    pub fn record_exported(&mut self, outcome: &PersistOutcome) {
        self.items_exported += 1;
        if outcome.audio_saved {
            self.audio_files += 1;
        }
        if outcome.video_saved {
            self.video_files += 1;
        }
    }

    /// An item could not be saved.
    pub fn record_failed(&mut self) {
        self.items_failed += 1;
    }
}

/// State of one export run.
#[derive(Debug, Default)]
pub struct ExportState {
    phase: ExportPhase,
    pub stats: ExportStats,
}

impl ExportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    /// Move to `next`, rejecting transitions the run model does not allow.
    pub fn advance(&mut self, next: ExportPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(Error::Config(format!(
                "invalid export transition: {} -> {}",
                self.phase, next
            )));
        }
        tracing::debug!("Export phase: {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Start resolving the next record. A record that was skipped leaves the
    /// run in `ResolvingItems`, so the next one continues from there.
    pub fn begin_item(&mut self) -> Result<()> {
        if self.phase == ExportPhase::ResolvingItems {
            return Ok(());
        }
        self.advance(ExportPhase::ResolvingItems)
    }
}
