//! Item folder reservation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::naming::{fallback_dir_name, primary_dir_name, validate_path_component};
use crate::media::Coub;

/// Highest `(n)` suffix tried before giving up on a title.
const MAX_FALLBACK_SUFFIX: u32 = 1000;

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

/// Create a fresh, uniquely named folder for a coub under `root`.
///
/// The primary name is `"{title}_{id}_"`. When it is taken, `"{title}(2)"`,
/// `"{title}(3)"`, ... are tried in turn. Each attempt is an exclusive
/// `create_dir`, so two concurrent writers never receive the same folder.
pub async fn reserve_item_dir(root: &Path, item: &Coub) -> Result<PathBuf> {
    validate_path_component(&item.id)?;
    ensure_dir(root).await?;

    let primary = root.join(primary_dir_name(&item.sanitized_title, &item.id));
    if try_create(&primary).await? {
        return Ok(primary);
    }

    tracing::warn!(
        "Path {} already exists, using another name...",
        primary.display()
    );

    for n in 2..=MAX_FALLBACK_SUFFIX {
        let candidate = root.join(fallback_dir_name(&item.sanitized_title, n));
        if try_create(&candidate).await? {
            return Ok(candidate);
        }
        tracing::debug!("Path {} already exists", candidate.display());
    }

    Err(Error::InvalidFilename(format!(
        "No free folder name for '{}' after {} attempts",
        item.sanitized_title, MAX_FALLBACK_SUFFIX
    )))
}

/// Create `path` exclusively. `Ok(false)` means something already occupies it.
async fn try_create(path: &Path) -> Result<bool> {
    match tokio::fs::create_dir(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(Error::Io(e)),
    }
}
