//! Statistics gathered during a crawl
//!
//! This module provides the counters the coordinator updates as it visits
//! pages, and a printer for displaying them once the crawl ends.

use crate::state::{PageOutcome, StopReason};
use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Outcome of every listing page visited, in visit order
    pub page_outcomes: Vec<(u32, PageOutcome)>,

    /// Items merged into the dataset
    pub items_harvested: u64,

    /// Detail pages that could not be fetched
    pub detail_failures: u64,

    /// Why the traversal ended
    pub stop_reason: Option<StopReason>,
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStats {
    /// Starts a new set of counters stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            page_outcomes: Vec::new(),
            items_harvested: 0,
            detail_failures: 0,
            stop_reason: None,
        }
    }

    pub fn record_page(&mut self, page: u32, outcome: PageOutcome) {
        self.page_outcomes.push((page, outcome));
    }

    pub fn record_item(&mut self, detail_fetched: bool) {
        self.items_harvested += 1;
        if !detail_fetched {
            self.detail_failures += 1;
        }
    }

    pub fn finish(&mut self, reason: StopReason) {
        self.stop_reason = Some(reason);
        self.finished_at = Some(Utc::now());
    }

    /// Listing pages requested, whatever their outcome
    pub fn pages_visited(&self) -> usize {
        self.page_outcomes.len()
    }

    /// Listing pages that could not be fetched
    pub fn pages_failed(&self) -> usize {
        self.page_outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == PageOutcome::FetchFailed)
            .count()
    }

    /// Listing pages that contributed items
    pub fn pages_harvested(&self) -> usize {
        self.page_outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_harvested())
            .count()
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_crawl_stats(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Pages:");
    println!("  Visited: {}", stats.pages_visited());
    println!("  With items: {}", stats.pages_harvested());
    println!("  Failed: {}", stats.pages_failed());
    println!();

    println!("Items:");
    println!("  Harvested: {}", stats.items_harvested);
    println!("  Missing detail: {}", stats.detail_failures);
    println!();

    if let Some(reason) = stats.stop_reason {
        println!("Stopped: {}", reason);
    }
}
