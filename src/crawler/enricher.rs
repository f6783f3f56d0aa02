//! Detail page enrichment
//!
//! Fetches an item's detail page and extracts its supplementary fields. A
//! failed fetch degrades that one record to empty detail fields; it never
//! aborts the crawl.

use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::parser::{parse_detail_page, ItemDetail};
use url::Url;

/// Outcome of enriching one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub detail: ItemDetail,
    /// False when the detail page could not be fetched
    pub fetched: bool,
}

/// Fetches and parses the detail page at `detail_url`
pub async fn enrich_item<F: PageFetcher>(fetcher: &F, detail_url: &Url) -> Enrichment {
    match fetcher.fetch(detail_url).await {
        FetchResult::Success { body, .. } => Enrichment {
            detail: parse_detail_page(&body),
            fetched: true,
        },
        failure => {
            tracing::warn!("Failed to fetch detail {}: {}", detail_url, failure);
            Enrichment {
                detail: ItemDetail::default(),
                fetched: false,
            }
        }
    }
}
