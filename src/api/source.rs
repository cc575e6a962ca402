//! Abstraction over the remote likes service.

use std::path::Path;

use async_trait::async_trait;

use crate::api::types::LikesPage;
use crate::error::Result;

/// Everything the export pipeline needs from the network.
///
/// [`crate::api::CoubApi`] is the production implementation; tests provide
/// in-memory fakes.
#[async_trait]
pub trait LikesSource: Send + Sync {
    /// Fetch one 1-based page of the liked coubs listing.
    async fn fetch_page(&self, page: u32) -> Result<LikesPage>;

    /// Download an asset URL into `dest`, returning the number of bytes written.
    async fn download_asset(&self, url: &str, dest: &Path) -> Result<u64>;
}
