//! Crawler module for catalog page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching, one attempt per request
//! - Listing and detail page parsing
//! - Listing page scheduling and the politeness throttle
//! - Overall crawl coordination

mod coordinator;
mod enricher;
mod fetcher;
mod parser;
mod scheduler;
#[cfg(test)]
mod testing;

pub use coordinator::{Coordinator, CrawlReport};
pub use enricher::{enrich_item, Enrichment};
pub use fetcher::{
    build_http_client, fetch_url, format_user_agent, FetchResult, HttpFetcher, NetworkErrorKind,
    PageFetcher,
};
pub use parser::{parse_detail_page, parse_listing_page, rating_from_classes, ItemDetail, ItemStub};
pub use scheduler::{ListingPage, PageSchedule, Politeness};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete crawl with a real HTTP client
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the user agent settings
/// 2. Build the listing page schedule
/// 3. Visit pages in order, enriching each item from its detail page
/// 4. Stop at the bound or at the first page that ends the traversal
///
/// Writing the records out is left to the caller.
pub async fn crawl(config: &Config) -> Result<CrawlReport, HarvestError> {
    let coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.run().await)
}
