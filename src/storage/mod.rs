//! Storage module for the raw and cleaned dataset files
//!
//! This module handles:
//! - The merged record shape written by a crawl
//! - Column schema and header alias resolution
//! - Writing datasets to CSV in one pass
//! - Reading a raw CSV back into typed rows, skipping malformed lines

mod schema;
mod tabular;

pub use schema::{ColumnMap, Field, CLEANED_COLUMNS, RAW_COLUMNS};
pub use tabular::{read_raw_table, write_records, RawRow, RawTable};

use crate::crawler::{ItemDetail, ItemStub};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or writing dataset files
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One harvested item: listing summary plus detail page fields
///
/// Field order matches the raw dataset header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Price")]
    pub price: String,

    #[serde(rename = "Availability")]
    pub availability: String,

    #[serde(rename = "Rating")]
    pub rating: String,

    /// Absolute URL of the detail page; unique within a crawl
    #[serde(rename = "DetailURL")]
    pub detail_url: String,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "UPC")]
    pub upc: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Product Type")]
    pub product_type: String,
}

impl MergedRecord {
    /// Combines a listing stub with the detail fields scraped for it
    pub fn merge(stub: ItemStub, detail: ItemDetail) -> Self {
        Self {
            title: stub.title,
            price: stub.price_text,
            availability: stub.availability_text,
            rating: stub.rating_token,
            detail_url: stub.detail_url.into(),
            category: detail.category,
            upc: detail.identifier,
            description: detail.description,
            product_type: detail.product_type,
        }
    }
}

/// Writes a crawl's records to the raw dataset file, in crawl order
pub fn write_raw_dataset(path: &Path, records: &[MergedRecord]) -> Result<(), StorageError> {
    write_records(path, &RAW_COLUMNS, records)
}
