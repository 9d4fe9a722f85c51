//! Concurrent fan-out/fan-in over catalog pages

use futures_util::stream::{self, StreamExt, TryStreamExt};

use super::client::CatalogSource;
use super::error::CatalogError;
use super::model::CatalogPage;

/// Fetch pages `1..=page_count` with at most `concurrency` requests in flight.
///
/// Pages come back in completion order, not page order. The first failing
/// page aborts the whole fetch; fetches still in flight are dropped and no
/// partial catalog is returned.
pub async fn fetch_all<S>(
    source: &S,
    page_count: u32,
    concurrency: usize,
) -> Result<Vec<CatalogPage>, CatalogError>
where
    S: CatalogSource + ?Sized,
{
    let concurrency = concurrency.max(1);
    tracing::info!(
        "Fetching {} catalog pages ({} at a time)",
        page_count,
        concurrency
    );

    let pages: Vec<CatalogPage> = stream::iter(1..=page_count)
        .map(|page| source.fetch_page(page))
        .buffer_unordered(concurrency)
        .try_collect()
        .await?;

    for page in &pages {
        tracing::debug!(
            "Received page {} with {} beatmaps",
            page.page_index,
            page.entries.len()
        );
    }

    Ok(pages)
}

/// Fetch page 1 to learn the page count, then fetch every page.
///
/// Page 1 is requested again as part of the fan-out so the result always
/// covers exactly `1..=pageCount`.
pub async fn fetch_catalog<S>(source: &S, concurrency: usize) -> Result<Vec<CatalogPage>, CatalogError>
where
    S: CatalogSource + ?Sized,
{
    let first = source.fetch_page(1).await?;
    tracing::info!(
        "Catalog reports {} pages, {} beatmaps",
        first.page_count,
        first.total_count
    );
    fetch_all(source, first.page_count, concurrency).await
}
