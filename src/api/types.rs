//! API response type definitions.

use serde::{Deserialize, Deserializer};

/// One page of the `timeline/likes` listing.
///
/// Coub records are kept as raw JSON so that a single malformed record can be
/// rejected by the resolver without failing the whole page. Only page 1 has
/// to carry `total_pages`; later pages may omit it.
#[derive(Debug, Clone, Deserialize)]
pub struct LikesPage {
    #[serde(default, deserialize_with = "deserialize_page_count")]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub coubs: Vec<serde_json::Value>,
}

/// Typed view of a single liked coub record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoubRecord {
    pub permalink: Option<String>,
    pub title: Option<String>,
    pub file_versions: Option<FileVersions>,
}

/// `file_versions` node of a coub record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileVersions {
    pub html5: Option<Html5Versions>,
}

/// HTML5 player assets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Html5Versions {
    pub video: Option<QualityVariants>,
    pub audio: Option<QualityVariants>,
}

/// Quality ladder for one asset kind. Video uses `higher`/`high`, audio uses `high`/`med`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityVariants {
    pub higher: Option<AssetVariant>,
    pub high: Option<AssetVariant>,
    pub med: Option<AssetVariant>,
}

/// A single downloadable asset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetVariant {
    pub url: Option<String>,
}

impl AssetVariant {
    /// The URL, unless absent or blank.
    pub fn non_empty_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// `total_pages` arrives either as a number or as a numeric string.
fn deserialize_page_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PageCount {
        Number(u64),
        Text(String),
    }

    let value = match Option::<PageCount>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(PageCount::Number(n)) => n,
        Some(PageCount::Text(s)) => s.trim().parse::<u64>().map_err(|e| {
            serde::de::Error::custom(format!("invalid total_pages '{}': {}", s, e))
        })?,
    };

    u32::try_from(value)
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("total_pages out of range: {}", value)))
}
