//! Page schedule and politeness throttle
//!
//! This module handles:
//! - Building the ordered listing page sequence (index page, then numbered
//!   catalog pages up to the configured bound)
//! - The fixed pause inserted after every network call

use crate::config::CrawlerConfig;
use crate::HarvestError;
use std::time::Duration;
use url::Url;

/// A listing page to visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// 1 for the index page, 2..=N for catalog pages
    pub number: u32,

    pub url: Url,
}

/// The ordered sequence of listing pages for one crawl
///
/// Page URLs are derived on demand, so the bound costs nothing until the
/// crawl actually reaches a page.
#[derive(Debug, Clone)]
pub struct PageSchedule {
    base: Url,
    index_path: String,
    catalog_page_pattern: String,
    max_pages: u32,
}

impl PageSchedule {
    /// Builds the schedule from crawler configuration
    ///
    /// Page 1 is `base_url + index_path`; page `n` for `2 <= n <= max_pages`
    /// is `base_url + catalog_page_pattern` with `{n}` substituted. The index
    /// page and the first catalog page are resolved here so a bad base or
    /// pattern is reported before any request is made.
    pub fn new(config: &CrawlerConfig) -> Result<Self, HarvestError> {
        let schedule = Self {
            base: Url::parse(&config.base_url)?,
            index_path: config.index_path.clone(),
            catalog_page_pattern: config.catalog_page_pattern.clone(),
            max_pages: config.max_pages,
        };

        for number in 1..=config.max_pages.min(2) {
            schedule.page(number)?;
        }

        Ok(schedule)
    }

    /// Resolves the URL of page `number`
    pub fn page(&self, number: u32) -> Result<ListingPage, HarvestError> {
        let path = if number == 1 {
            self.index_path.clone()
        } else {
            self.catalog_page_pattern
                .replace("{n}", &number.to_string())
        };

        let url = self.base.join(&path).map_err(|e| HarvestError::PageUrl {
            page: number,
            message: format!("cannot join '{}' onto {}: {}", path, self.base, e),
        })?;

        Ok(ListingPage { number, url })
    }

    /// Pages in visiting order, up to the configured bound
    pub fn iter(&self) -> impl Iterator<Item = ListingPage> + '_ {
        (1..=self.max_pages).map_while(move |number| match self.page(number) {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::error!("Ending schedule early: {}", e);
                None
            }
        })
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }
}

/// Fixed pause applied after every network call
///
/// This is a constant throttle, not a backoff: the delay never depends on
/// the outcome of the call it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Politeness {
    delay: Duration,
}

impl Politeness {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Sleeps for the configured delay
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
