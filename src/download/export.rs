//! Export every liked coub: listing, resolution, then persistence.

use std::path::PathBuf;

use futures::{stream, StreamExt};
use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;

use crate::api::LikesSource;
use crate::config::{Config, SanitizeMode};
use crate::download::pagination::{fetch_first_page, fetch_remaining_pages};
use crate::download::persist::{persist_item, PersistOutcome};
use crate::download::state::{ExportPhase, ExportState, ExportStats};
use crate::error::{Error, Result};
use crate::media::resolve;
use crate::output::create_item_bar;

/// Settings for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub root: PathBuf,
    pub sanitize_mode: SanitizeMode,
    pub page_concurrency: usize,
    pub item_concurrency: usize,
    pub show_progress: bool,
}

impl ExportOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.download_directory(),
            sanitize_mode: config.options.sanitize_mode,
            page_concurrency: config.options.page_concurrency,
            item_concurrency: config.options.item_concurrency,
            show_progress: config.options.show_progress,
        }
    }
}

/// Result of a run that got past the listing.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// `Done`, or `Cancelled` when the token fired while saving items.
    pub phase: ExportPhase,
    pub stats: ExportStats,
}

/// Export all liked coubs into `options.root`.
///
/// Listing failures (including cancellation while listing) abort the run
/// with an error and nothing is written. Each record is then resolved and
/// saved in turn; malformed records and per-item failures are logged and
/// counted, and the run carries on with the next coub.
pub async fn export_liked(
    source: &dyn LikesSource,
    options: &ExportOptions,
    cancel: &CancellationToken,
) -> Result<ExportReport> {
    let mut state = ExportState::new();

    state.advance(ExportPhase::FetchingFirstPage)?;
    let first = match fetch_first_page(source, cancel).await {
        Ok(page) => page,
        Err(e) => return Err(abort(&mut state, e)),
    };
    state.stats.total_pages = first.total_pages;

    state.advance(ExportPhase::FetchingRemainingPages)?;
    let mut records = first.coubs;
    match fetch_remaining_pages(source, first.total_pages, options.page_concurrency, cancel).await
    {
        Ok(rest) => records.extend(rest),
        Err(e) => return Err(abort(&mut state, e)),
    }
    state.stats.items_found = records.len() as u64;
    tracing::info!("Collected {} liked coubs", records.len());

    let progress = if options.show_progress {
        create_item_bar(records.len() as u64, "Saving coubs")
    } else {
        ProgressBar::hidden()
    };

    let mut items = stream::iter(records.iter().enumerate())
        .map(move |(index, raw)| process_record(source, index, raw, options, cancel))
        .buffer_unordered(options.item_concurrency.max(1));

    while let Some(outcome) = items.next().await {
        // None: the token fired before the record was picked up
        let Some(outcome) = outcome else {
            continue;
        };

        state.begin_item()?;
        match outcome {
            ItemOutcome::Skipped => state.stats.record_skipped(),
            ItemOutcome::Saved(saved) => {
                state.advance(ExportPhase::PersistingItems)?;
                state.stats.record_exported(&saved);
            }
            ItemOutcome::Failed(e) => {
                state.advance(ExportPhase::PersistingItems)?;
                tracing::warn!("{}", e);
                state.stats.record_failed();
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if cancel.is_cancelled() {
        state.advance(ExportPhase::Cancelled)?;
    } else {
        state.advance(ExportPhase::Done)?;
    }

    Ok(ExportReport {
        phase: state.phase(),
        stats: state.stats,
    })
}

/// What happened to one listing record.
#[derive(Debug)]
enum ItemOutcome {
    /// The record could not be resolved.
    Skipped,
    Saved(PersistOutcome),
    Failed(Error),
}

/// Resolve one record and, if that works, save it. Returns `None` when the
/// run was cancelled before the record was started.
async fn process_record(
    source: &dyn LikesSource,
    index: usize,
    raw: &serde_json::Value,
    options: &ExportOptions,
    cancel: &CancellationToken,
) -> Option<ItemOutcome> {
    if cancel.is_cancelled() {
        return None;
    }

    let coub = match resolve(raw, options.sanitize_mode) {
        Ok(coub) => coub,
        Err(e) => {
            tracing::warn!("Skipping liked record #{}: {}", index + 1, e);
            return Some(ItemOutcome::Skipped);
        }
    };

    tracing::info!("Downloading coub: {}", coub);
    let outcome = match persist_item(source, &coub, &options.root).await {
        Ok(saved) => {
            tracing::debug!("Saved {} to {}", coub, saved.dir.display());
            ItemOutcome::Saved(saved)
        }
        Err(e) => ItemOutcome::Failed(e),
    };
    Some(outcome)
}

fn abort(state: &mut ExportState, error: Error) -> Error {
    let during = state.phase();
    let terminal = if matches!(error, Error::Cancelled) {
        ExportPhase::Cancelled
    } else {
        ExportPhase::Aborted
    };
    if let Err(e) = state.advance(terminal) {
        tracing::debug!("{}", e);
    }
    tracing::error!("Export {} while {}: {}", terminal, during, error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{coub_json, FakeSource};
    use serde_json::json;
    use tempfile::tempdir;

    fn options(root: &std::path::Path) -> ExportOptions {
        ExportOptions {
            root: root.to_path_buf(),
            sanitize_mode: SanitizeMode::AllLetters,
            page_concurrency: 1,
            item_concurrency: 1,
            show_progress: false,
        }
    }

    #[tokio::test]
    async fn test_exports_every_item() {
        let root = tempdir().unwrap();
        let source = FakeSource::with_pages(vec![
            vec![coub_json("a1", "First", Some("https://cdn/v1"), Some("https://cdn/a1"))],
            vec![coub_json("b2", "Second", Some("https://cdn/v2"), None)],
        ])
        .asset("https://cdn/v1", b"v1")
        .asset("https://cdn/a1", b"a1")
        .asset("https://cdn/v2", b"v2");

        let report = export_liked(&source, &options(root.path()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.phase, ExportPhase::Done);
        assert_eq!(report.stats.total_pages, 2);
        assert_eq!(report.stats.items_found, 2);
        assert_eq!(report.stats.items_exported, 2);
        assert_eq!(report.stats.audio_files, 1);
        assert_eq!(report.stats.video_files, 2);
        assert_eq!(
            std::fs::read(root.path().join("Second_b2_").join("video.mp4")).unwrap(),
            b"v2"
        );
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped() {
        let root = tempdir().unwrap();
        let source = FakeSource::with_pages(vec![vec![
            json!({"title": "no permalink"}),
            coub_json("ok", "Fine", None, None),
        ]]);

        let report = export_liked(&source, &options(root.path()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.stats.items_skipped, 1);
        assert_eq!(report.stats.items_exported, 1);
        assert!(root.path().join("Fine_ok_").is_dir());
    }

    #[tokio::test]
    async fn test_item_failure_does_not_stop_run() {
        let root = tempdir().unwrap();
        let source = FakeSource::with_pages(vec![vec![
            coub_json("bad", "Broken", Some("https://cdn/missing"), None),
            coub_json("good", "Works", Some("https://cdn/v"), None),
        ]])
        .asset("https://cdn/v", b"v");

        let report = export_liked(&source, &options(root.path()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.phase, ExportPhase::Done);
        assert_eq!(report.stats.items_failed, 1);
        assert_eq!(report.stats.items_exported, 1);
        assert!(root.path().join("Works_good_").join("video.mp4").exists());
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_before_writing() {
        let root = tempdir().unwrap();
        let mut source = FakeSource::with_pages(vec![
            vec![coub_json("a", "A", None, None)],
            vec![coub_json("b", "B", None, None)],
        ]);
        source.failing_page = Some(2);

        let err = export_liked(&source, &options(root.path()), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Fetch { page: 2, .. }));
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_get_distinct_folders() {
        let root = tempdir().unwrap();
        let source = FakeSource::with_pages(vec![vec![
            coub_json("x", "Same", None, None),
            coub_json("x", "Same", None, None),
            coub_json("x", "Same", None, None),
        ]]);
        let mut opts = options(root.path());
        opts.item_concurrency = 3;

        let report = export_liked(&source, &opts, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.stats.items_exported, 3);
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 3);
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped_without_downloads() {
        let root = tempdir().unwrap();
        let source = FakeSource::default().asset("https://cdn/v", b"v");
        let opts = options(root.path());
        let cancel = CancellationToken::new();

        // no title
        let broken = json!({
            "permalink": "x",
            "file_versions": { "html5": { "video": { "higher": { "url": "https://cdn/v" } } } }
        });
        let outcome = process_record(&source, 0, &broken, &opts, &cancel).await;
        assert!(matches!(outcome, Some(ItemOutcome::Skipped)));
        assert!(source.requested_assets.lock().unwrap().is_empty());

        let fine = coub_json("ok", "Fine", Some("https://cdn/v"), None);
        let outcome = process_record(&source, 1, &fine, &opts, &cancel).await;
        assert!(matches!(outcome, Some(ItemOutcome::Saved(_))));
        assert_eq!(source.requested_assets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_records_are_saved_in_listing_order() {
        let root = tempdir().unwrap();
        let source = FakeSource::with_pages(vec![vec![
            coub_json("a", "A", Some("https://cdn/a"), None),
            json!({"title": "no permalink"}),
            coub_json("c", "C", Some("https://cdn/c"), None),
        ]])
        .asset("https://cdn/a", b"a")
        .asset("https://cdn/c", b"c");

        let report = export_liked(&source, &options(root.path()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.phase, ExportPhase::Done);
        assert_eq!(report.stats.items_skipped, 1);
        assert_eq!(report.stats.items_exported, 2);
        assert_eq!(
            *source.requested_assets.lock().unwrap(),
            vec!["https://cdn/a".to_string(), "https://cdn/c".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_listing_is_done() {
        let root = tempdir().unwrap();
        let source = FakeSource::with_pages(vec![vec![]]);

        let report = export_liked(&source, &options(root.path()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.phase, ExportPhase::Done);
        assert_eq!(report.stats.items_found, 0);
    }

    #[tokio::test]
    async fn test_cancelled_record_is_not_started() {
        let root = tempdir().unwrap();
        let source = FakeSource::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = process_record(
            &source,
            0,
            &coub_json("a", "A", None, None),
            &options(root.path()),
            &cancel,
        )
        .await;

        assert!(outcome.is_none());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_run() {
        let root = tempdir().unwrap();
        let source = FakeSource::with_pages(vec![vec![coub_json("a", "A", None, None)]]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = export_liked(&source, &options(root.path()), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
