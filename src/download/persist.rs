//! Save one coub to disk.

use std::path::{Path, PathBuf};

use crate::api::LikesSource;
use crate::error::{Error, Result};
use crate::fs::paths::reserve_item_dir;
use crate::media::{AssetKind, Coub};

/// What was written for a single coub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOutcome {
    pub dir: PathBuf,
    pub audio_saved: bool,
    pub video_saved: bool,
}

/// Create the coub's folder under `root` and write its audio and video files.
///
/// Assets are streamed to disk one at a time, audio first. The first
/// failure stops the item; files already written stay in place. Any failure
/// is reported as [`Error::Persistence`] carrying the coub's title and URL.
pub async fn persist_item(
    source: &dyn LikesSource,
    item: &Coub,
    root: &Path,
) -> Result<PersistOutcome> {
    let dir = reserve_item_dir(root, item)
        .await
        .map_err(|e| persistence_error(item, format!("could not create folder: {}", e)))?;

    let mut outcome = PersistOutcome {
        dir,
        audio_saved: false,
        video_saved: false,
    };

    for (kind, url) in item.assets() {
        save_asset(source, url, &outcome.dir, kind)
            .await
            .map_err(|e| persistence_error(item, format!("{} failed: {}", kind, e)))?;

        match kind {
            AssetKind::Audio => outcome.audio_saved = true,
            AssetKind::Video => outcome.video_saved = true,
        }
    }

    Ok(outcome)
}

async fn save_asset(
    source: &dyn LikesSource,
    url: &str,
    dir: &Path,
    kind: AssetKind,
) -> Result<PathBuf> {
    let path = dir.join(kind.file_name());
    let written = source.download_asset(url, &path).await?;
    tracing::debug!("Wrote {} bytes to {}", written, path.display());
    Ok(path)
}

fn persistence_error(item: &Coub, message: String) -> Error {
    Error::Persistence {
        title: item.title.clone(),
        url: item.page_url.clone(),
        message,
    }
}
