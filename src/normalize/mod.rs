//! Normalizer turning a raw harvest into the cleaned dataset
//!
//! This module handles:
//! - Deriving numeric price and integer stock from scraped text
//! - Filling defaults for absent titles, categories and ratings
//! - Projecting rows onto the cleaned column set and writing them out

mod cleaner;
mod fields;

pub use cleaner::{clean_dataset, clean_table, CleanReport, CleanedRecord};
pub use fields::{extract_stock, parse_price};
