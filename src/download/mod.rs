//! Download module for the export pipeline.
//!
//! This module provides:
//! - Listing traversal across all pages
//! - Per-coub persistence
//! - Export orchestration and run state

pub mod export;
pub mod pagination;
pub mod persist;
pub mod state;

pub use export::{export_liked, ExportOptions, ExportReport};
pub use pagination::{
    collect_all, fetch_first_page, fetch_remaining_pages, FirstPage, FIRST_PAGE,
};
pub use persist::{persist_item, PersistOutcome};
pub use state::{ExportPhase, ExportState, ExportStats};
