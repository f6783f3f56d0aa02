//! Catalog-Harvest: a polite product catalog harvester
//!
//! This crate walks a paginated catalog site, enriches every listed item from
//! its detail page, writes the raw harvest to CSV, and normalizes that raw file
//! into a cleaned dataset with numeric price and stock columns.

pub mod config;
pub mod crawler;
pub mod normalize;
pub mod output;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Catalog-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid page URL for page {page}: {message}")]
    PageUrl { page: u32, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("{} not found. {hint}", path.display())]
    MissingInput { path: PathBuf, hint: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Catalog-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlReport};
pub use normalize::{clean_dataset, CleanedRecord};
pub use state::{PageOutcome, StopReason, TerminationPolicy};
pub use storage::MergedRecord;
