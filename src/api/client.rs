//! Coub API HTTP client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header::HeaderMap, Client, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::api::auth::auth_headers;
use crate::api::source::LikesSource;
use crate::api::types::LikesPage;
use crate::error::{Error, Result};

/// Coub base URL.
pub const API_BASE: &str = "https://coub.com";

/// Path of the liked coubs timeline.
const LIKES_PATH: &str = "/api/v2/timeline/likes";

/// Coub API client bound to one session token.
pub struct CoubApi {
    client: Client,
    base_url: String,
    auth: HeaderMap,
}

impl CoubApi {
    /// Create a client against the public coub.com API.
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(API_BASE, token, timeout)
    }

    /// Create a client against an alternative host (used by tests).
    pub fn with_base_url(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: auth_headers(token)?,
        })
    }

    /// Build the listing URL for a page.
    pub fn page_url(&self, page: u32) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, LIKES_PATH))?;
        url.query_pairs_mut()
            .append_pair("all", "true")
            .append_pair("order_by", "date")
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

#[async_trait]
impl LikesSource for CoubApi {
    async fn fetch_page(&self, page: u32) -> Result<LikesPage> {
        let url = self.page_url(page)?;
        tracing::debug!("GET {}", url);

        let fetch_error = |message: String| Error::Fetch { page, message };

        let response = self
            .client
            .get(url)
            .headers(self.auth.clone())
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!(
                "HTTP {} on likes page {}; check the remember_token value",
                status, page
            )));
        }

        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        serde_json::from_slice::<LikesPage>(&body).map_err(|e| {
            let preview = String::from_utf8_lossy(&body[..body.len().min(500)]).into_owned();
            fetch_error(format!("{} - Response: {}", e, preview))
        })
    }

    async fn download_asset(&self, url: &str, dest: &Path) -> Result<u64> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        // Stream to file
        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_page_url() {
        let api = CoubApi::new("token", Duration::from_secs(5)).unwrap();
        assert_eq!(
            api.page_url(3).unwrap().as_str(),
            "https://coub.com/api/v2/timeline/likes?all=true&order_by=date&page=3"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api =
            CoubApi::with_base_url("http://127.0.0.1:9/", "token", Duration::from_secs(5)).unwrap();
        assert!(api
            .page_url(1)
            .unwrap()
            .as_str()
            .starts_with("http://127.0.0.1:9/api/v2/timeline/likes?"));
    }

    #[tokio::test]
    async fn test_download_asset_streams_to_file() {
        let server = MockServer::start().await;
        let body = vec![7u8; 64 * 1024];
        Mock::given(method("GET"))
            .and(path("/cdn/video.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let dest = dir.path().join("video.mp4");
        let api = CoubApi::with_base_url(&server.uri(), "token", Duration::from_secs(5)).unwrap();

        let written = api
            .download_asset(&format!("{}/cdn/video.mp4", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
    }

    #[tokio::test]
    async fn test_download_asset_http_error_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let dest = dir.path().join("audio.mp3");
        let api = CoubApi::with_base_url(&server.uri(), "token", Duration::from_secs(5)).unwrap();

        let err = api
            .download_asset(&format!("{}/cdn/audio.mp3", server.uri()), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Download(_)));
        assert!(!dest.exists());
    }
}
