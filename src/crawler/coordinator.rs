//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that walks the listing page schedule
//! in order, enriches every stub from its detail page, and accumulates the
//! merged records. Execution is strictly sequential: one request at a time,
//! each followed by the politeness pause.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::enricher::enrich_item;
use crate::crawler::fetcher::{FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::parser::{parse_listing_page, ItemStub};
use crate::crawler::scheduler::{ListingPage, PageSchedule, Politeness};
use crate::output::CrawlStats;
use crate::state::{PageOutcome, StopReason, TerminationPolicy};
use crate::storage::MergedRecord;
use crate::HarvestError;

/// Everything a crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Merged records in crawl order
    pub records: Vec<MergedRecord>,

    pub stats: CrawlStats,
}

/// Main crawler coordinator structure
///
/// Owns the fetcher (and with it the HTTP client) for the whole run.
pub struct Coordinator<F: PageFetcher> {
    fetcher: F,
    schedule: PageSchedule,
    politeness: Politeness,
    policy: TerminationPolicy,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator backed by a real HTTP client
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        let fetcher =
            HttpFetcher::from_config(&config.user_agent, config.crawler.request_timeout_secs)?;
        Self::new(&config.crawler, fetcher)
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator that fetches through `fetcher`
    pub fn new(config: &CrawlerConfig, fetcher: F) -> Result<Self, HarvestError> {
        Ok(Self {
            fetcher,
            schedule: PageSchedule::new(config)?,
            politeness: Politeness::from_millis(config.politeness_delay_ms),
            policy: TerminationPolicy::new(config.stop_on_fetch_failure),
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs the crawl to completion
    ///
    /// Pages are visited in schedule order until the bound is reached or the
    /// termination policy says a page ends the traversal. Per-page and
    /// per-item failures are logged and degrade the data; they never abort
    /// the run.
    pub async fn run(&self) -> CrawlReport {
        let mut stats = CrawlStats::new();
        let mut records = Vec::new();
        let mut stop_reason = StopReason::BoundReached;

        tracing::debug!("Crawling up to {} listing pages", self.schedule.max_pages());

        for page in self.schedule.iter() {
            tracing::info!("Scraping page {} ({})", page.number, page.url);

            let outcome = match self.fetch_listing(&page).await {
                Some(stubs) => {
                    let outcome = PageOutcome::from_stub_count(stubs.len());
                    for stub in stubs {
                        self.harvest_item(stub, &mut records, &mut stats).await;
                    }
                    outcome
                }
                None => PageOutcome::FetchFailed,
            };

            stats.record_page(page.number, outcome);

            if let Some(reason) = self.policy.should_stop(page.number, outcome) {
                tracing::info!("Stopping early: {}", reason);
                stop_reason = reason;
                break;
            }

            tracing::debug!("Page {} {}", page.number, outcome);
            self.politeness.pause().await;
        }

        stats.finish(stop_reason);
        tracing::info!(
            "Crawl finished with {} records from {} pages",
            records.len(),
            stats.pages_visited()
        );

        CrawlReport { records, stats }
    }

    /// Fetches and parses one listing page; None when the fetch failed
    async fn fetch_listing(&self, page: &ListingPage) -> Option<Vec<ItemStub>> {
        match self.fetcher.fetch(&page.url).await {
            FetchResult::Success { body, .. } => Some(parse_listing_page(&body, &page.url)),
            failure => {
                tracing::warn!("Failed to fetch page {}: {}", page.url, failure);
                None
            }
        }
    }

    /// Enriches one stub, pauses, and appends the merged record
    async fn harvest_item(
        &self,
        stub: ItemStub,
        records: &mut Vec<MergedRecord>,
        stats: &mut CrawlStats,
    ) {
        tracing::debug!("Enriching '{}' from {}", stub.title, stub.detail_url);

        let enrichment = enrich_item(&self.fetcher, &stub.detail_url).await;
        self.politeness.pause().await;

        stats.record_item(enrichment.fetched);
        records.push(MergedRecord::merge(stub, enrichment.detail));
    }
}
