use serde::Deserialize;

/// Main configuration structure for Catalog-Harvest
///
/// Every section and key has a default, so an empty file (or no file at all)
/// describes a crawl of the reference catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Root of the catalog site; index and catalog paths are joined onto it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the index (first listing) page, relative to `base_url`
    #[serde(rename = "index-path")]
    pub index_path: String,

    /// Path of numbered catalog pages; `{n}` is replaced with the page number
    #[serde(rename = "catalog-page-pattern")]
    pub catalog_page_pattern: String,

    /// Upper bound on listing pages, the index page counting as page 1
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Pause after every network call (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Timeout applied to every GET (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Whether a listing page that fails to fetch ends the crawl
    #[serde(rename = "stop-on-fetch-failure")]
    pub stop_on_fetch_failure: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://books.toscrape.com/".to_string(),
            index_path: "index.html".to_string(),
            catalog_page_pattern: "catalogue/page-{n}.html".to_string(),
            max_pages: 50,
            politeness_delay_ms: 200,
            request_timeout_secs: 10,
            stop_on_fetch_failure: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "books-scraper-bot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the raw harvest CSV
    #[serde(rename = "raw-path")]
    pub raw_path: String,

    /// Path of the cleaned CSV
    #[serde(rename = "cleaned-path")]
    pub cleaned_path: String,

    /// Rows of the raw dataset echoed after a crawl
    #[serde(rename = "raw-preview-rows")]
    pub raw_preview_rows: usize,

    /// Rows of the cleaned dataset echoed after cleaning
    #[serde(rename = "cleaned-preview-rows")]
    pub cleaned_preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            raw_path: "data/books.csv".to_string(),
            cleaned_path: "data/books_cleaned.csv".to_string(),
            raw_preview_rows: 5,
            cleaned_preview_rows: 6,
        }
    }
}
