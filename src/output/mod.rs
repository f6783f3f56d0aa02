//! Output module for operator feedback
//!
//! This module handles:
//! - Recording and printing crawl statistics
//! - Printing short previews of the raw and cleaned datasets

mod preview;
pub mod stats;

pub use preview::{print_cleaned_preview, print_raw_preview};
pub use stats::{print_crawl_stats, CrawlStats};
