//! Projection of raw rows onto the cleaned dataset

use crate::normalize::fields::{extract_stock, parse_price};
use crate::storage::{read_raw_table, write_records, Field, RawRow, RawTable, CLEANED_COLUMNS};
use crate::HarvestError;
use serde::Serialize;
use std::path::Path;

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_CATEGORY: &str = "Unknown";

/// One row of the cleaned dataset
///
/// Field order matches the cleaned dataset header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRecord {
    #[serde(rename = "Title")]
    pub title: String,

    /// Price text exactly as scraped
    #[serde(rename = "Price")]
    pub price_raw: Option<String>,

    #[serde(rename = "PriceNum")]
    pub price_numeric: f64,

    #[serde(rename = "Stock")]
    pub stock_count: u64,

    #[serde(rename = "Rating")]
    pub rating_raw: String,

    #[serde(rename = "RatingText")]
    pub rating_text: String,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "UPC")]
    pub identifier: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "DetailURL")]
    pub detail_url: String,
}

impl CleanedRecord {
    /// Derives a cleaned record from one raw row, applying every default
    pub fn from_raw(row: &RawRow) -> Self {
        let text = |field: Field| row.get(field).unwrap_or_default().to_string();
        let rating = text(Field::Rating);

        Self {
            title: row.get(Field::Title).unwrap_or(UNKNOWN_TITLE).to_string(),
            price_raw: row.get(Field::Price).map(str::to_string),
            price_numeric: row.get(Field::Price).and_then(parse_price).unwrap_or(0.0),
            stock_count: row.get(Field::Availability).map(extract_stock).unwrap_or(0),
            rating_text: rating.clone(),
            rating_raw: rating,
            category: row.get(Field::Category).unwrap_or(UNKNOWN_CATEGORY).to_string(),
            identifier: text(Field::Identifier),
            description: text(Field::Description),
            detail_url: text(Field::DetailUrl),
        }
    }
}

/// Result of a cleaning pass
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub records: Vec<CleanedRecord>,

    /// Raw lines dropped as malformed
    pub skipped_rows: usize,

    /// Semantic fields absent from the raw header
    pub missing_fields: Vec<Field>,
}

/// Cleans every row of a loaded raw table
pub fn clean_table(table: &RawTable) -> Vec<CleanedRecord> {
    table.rows.iter().map(CleanedRecord::from_raw).collect()
}

/// Reads the raw dataset at `input`, cleans it, and writes the cleaned dataset to `output`
///
/// The input file is never modified. A missing input is fatal and reported
/// with a hint to run the crawl first.
pub fn clean_dataset(input: &Path, output: &Path) -> Result<CleanReport, HarvestError> {
    if !input.exists() {
        return Err(HarvestError::MissingInput {
            path: input.to_path_buf(),
            hint: "Run `catalog-harvest crawl` to scrape first.".to_string(),
        });
    }

    let table = read_raw_table(input)?;
    let missing_fields = table.columns.missing();
    if !missing_fields.is_empty() {
        tracing::info!(
            "Raw dataset {} lacks columns {:?}; defaults will be used",
            input.display(),
            missing_fields
        );
    }

    let records = clean_table(&table);
    write_records(output, &CLEANED_COLUMNS, &records)?;

    tracing::info!(
        "Cleaned {} rows ({} skipped) into {}",
        records.len(),
        table.skipped,
        output.display()
    );

    Ok(CleanReport {
        records,
        skipped_rows: table.skipped,
        missing_fields,
    })
}
