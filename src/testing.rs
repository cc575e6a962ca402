//! In-memory [`LikesSource`] for unit tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{LikesPage, LikesSource};
use crate::error::{Error, Result};

/// Reports `total_pages` on page 1 only.
#[derive(Default)]
pub struct FakeSource {
    pub total_pages: Option<u32>,
    pub pages: HashMap<u32, Vec<Value>>,
    pub assets: HashMap<String, Vec<u8>>,
    pub failing_page: Option<u32>,
    pub requested_pages: Mutex<Vec<u32>>,
    pub requested_assets: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_pages(pages: Vec<Vec<Value>>) -> Self {
        Self {
            total_pages: Some(pages.len() as u32),
            pages: pages
                .into_iter()
                .enumerate()
                .map(|(i, coubs)| (i as u32 + 1, coubs))
                .collect(),
            ..Default::default()
        }
    }

    pub fn asset(mut self, url: &str, bytes: &[u8]) -> Self {
        self.assets.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        let mut pages = self.requested_pages.lock().unwrap().clone();
        pages.sort_unstable();
        pages
    }
}

#[async_trait]
impl LikesSource for FakeSource {
    async fn fetch_page(&self, page: u32) -> Result<LikesPage> {
        self.requested_pages.lock().unwrap().push(page);
        if self.failing_page == Some(page) {
            return Err(Error::Fetch {
                page,
                message: "HTTP 500".into(),
            });
        }
        Ok(LikesPage {
            total_pages: if page == 1 { self.total_pages } else { None },
            coubs: self.pages.get(&page).cloned().unwrap_or_default(),
        })
    }

    async fn download_asset(&self, url: &str, dest: &Path) -> Result<u64> {
        self.requested_assets.lock().unwrap().push(url.to_string());
        let bytes = self
            .assets
            .get(url)
            .ok_or_else(|| Error::Download(format!("Failed to download {}: HTTP 404", url)))?;
        tokio::fs::write(dest, bytes).await?;
        Ok(bytes.len() as u64)
    }
}

/// A raw listing record with the given assets.
pub fn coub_json(id: &str, title: &str, video: Option<&str>, audio: Option<&str>) -> Value {
    json!({
        "permalink": id,
        "title": title,
        "file_versions": {
            "html5": {
                "video": { "higher": { "url": video } },
                "audio": { "high": { "url": audio } }
            }
        }
    })
}
