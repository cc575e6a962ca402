//! Turn raw listing records into resolved coubs.

use serde::Deserialize;

use crate::api::types::{AssetVariant, CoubRecord, Html5Versions};
use crate::config::SanitizeMode;
use crate::error::{Error, Result};
use crate::fs::naming::sanitize_title;
use crate::media::item::{Coub, VIEW_URL_PREFIX};

/// Resolve one raw record from the `coubs` array.
///
/// Fails with [`Error::Resolution`] when the record is not an object of the
/// expected shape or lacks a permalink or title. Missing asset URLs are not
/// an error.
pub fn resolve(raw: &serde_json::Value, mode: SanitizeMode) -> Result<Coub> {
    let record = CoubRecord::deserialize(raw)
        .map_err(|e| Error::Resolution(format!("unexpected record shape: {}", e)))?;
    resolve_record(record, mode)
}

/// Resolve an already-decoded record.
pub fn resolve_record(record: CoubRecord, mode: SanitizeMode) -> Result<Coub> {
    let id = record
        .permalink
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| Error::Resolution("missing permalink".into()))?;

    let title = record
        .title
        .ok_or_else(|| Error::Resolution(format!("missing title for coub {}", id)))?;

    let html5 = record.file_versions.and_then(|f| f.html5);

    Ok(Coub {
        sanitized_title: sanitize_title(&title, mode),
        page_url: format!("{}{}", VIEW_URL_PREFIX, id),
        video_url: html5.as_ref().and_then(best_video_url),
        audio_url: html5.as_ref().and_then(best_audio_url),
        title,
        id,
    })
}

/// Video: `higher`, then `high`.
fn best_video_url(html5: &Html5Versions) -> Option<String> {
    let video = html5.video.as_ref()?;
    first_url([&video.higher, &video.high])
}

/// Audio: `high`, then `med`.
fn best_audio_url(html5: &Html5Versions) -> Option<String> {
    let audio = html5.audio.as_ref()?;
    first_url([&audio.high, &audio.med])
}

fn first_url(ladder: [&Option<AssetVariant>; 2]) -> Option<String> {
    ladder
        .into_iter()
        .flatten()
        .find_map(AssetVariant::non_empty_url)
        .map(str::to_string)
}
