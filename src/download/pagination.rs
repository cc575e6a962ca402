//! Walk every page of the liked coubs listing.

use futures::{stream, StreamExt, TryStreamExt};
use tokio_util::sync::CancellationToken;

use crate::api::{LikesPage, LikesSource};
use crate::error::{Error, Result};

/// The listing starts at page 1.
pub const FIRST_PAGE: u32 = 1;

/// Page 1 of the listing together with the page count it reported.
#[derive(Debug, Clone)]
pub struct FirstPage {
    pub total_pages: u32,
    pub coubs: Vec<serde_json::Value>,
}

/// Fetch page 1, which carries the authoritative page count.
///
/// A page 1 without `total_pages` is a listing failure.
pub async fn fetch_first_page(
    source: &dyn LikesSource,
    cancel: &CancellationToken,
) -> Result<FirstPage> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let page = source.fetch_page(FIRST_PAGE).await?;
    let total_pages = page.total_pages.ok_or_else(|| Error::Fetch {
        page: FIRST_PAGE,
        message: "response has no total_pages".into(),
    })?;

    tracing::info!("Found {} pages, starting to collect data..", total_pages);
    Ok(FirstPage {
        total_pages,
        coubs: page.coubs,
    })
}

/// Fetch pages `2..=total_pages` and return their records in page order.
///
/// The page count these pages report, if any, is ignored. Up to `concurrency` pages are in flight at once; ordering is restored
/// before flattening. Any failing page aborts the whole traversal.
pub async fn fetch_remaining_pages(
    source: &dyn LikesSource,
    total_pages: u32,
    concurrency: usize,
    cancel: &CancellationToken,
) -> Result<Vec<serde_json::Value>> {
    let pages: Vec<LikesPage> = stream::iter(FIRST_PAGE + 1..=total_pages)
        .map(move |page| async move {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            tracing::debug!("Fetching likes page {}/{}", page, total_pages);
            source.fetch_page(page).await
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    Ok(pages.into_iter().flat_map(|page| page.coubs).collect())
}

/// Collect the raw records of every liked coub, page order then in-page order.
pub async fn collect_all(
    source: &dyn LikesSource,
    concurrency: usize,
    cancel: &CancellationToken,
) -> Result<Vec<serde_json::Value>> {
    let first = fetch_first_page(source, cancel).await?;
    let mut records = first.coubs;
    records.extend(fetch_remaining_pages(source, first.total_pages, concurrency, cancel).await?);
    Ok(records)
}
