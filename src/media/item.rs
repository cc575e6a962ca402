//! Resolved coub representation.

use std::fmt;

/// Prefix of the public viewer URL; the permalink is appended.
pub const VIEW_URL_PREFIX: &str = "https://coub.com/view/";

/// File name for the audio track inside an item folder.
pub const AUDIO_FILENAME: &str = "audio.mp3";

/// File name for the video track inside an item folder.
pub const VIDEO_FILENAME: &str = "video.mp4";

/// Kind of asset attached to a coub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Audio,
    Video,
}

impl AssetKind {
    /// Fixed file name the asset is written to.
    pub fn file_name(&self) -> &'static str {
        match self {
            AssetKind::Audio => AUDIO_FILENAME,
            AssetKind::Video => VIDEO_FILENAME,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Audio => write!(f, "audio"),
            AssetKind::Video => write!(f, "video"),
        }
    }
}

/// A liked coub ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coub {
    /// Permalink identifier.
    pub id: String,

    /// Title as shown on the site.
    pub title: String,

    /// Title reduced to the active sanitize mode's allow-list.
    pub sanitized_title: String,

    /// Public viewer URL.
    pub page_url: String,

    /// Best available video URL.
    pub video_url: Option<String>,

    /// Best available audio URL.
    pub audio_url: Option<String>,
}

impl Coub {
    /// Assets to download, audio first.
    pub fn assets(&self) -> Vec<(AssetKind, &str)> {
        let mut assets = Vec::with_capacity(2);
        if let Some(url) = self.audio_url.as_deref() {
            assets.push((AssetKind::Audio, url));
        }
        if let Some(url) = self.video_url.as_deref() {
            assets.push((AssetKind::Video, url));
        }
        assets
    }
}

impl fmt::Display for Coub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({})", self.title, self.page_url)
    }
}
