//! Short dataset previews printed after each stage

use crate::normalize::CleanedRecord;
use crate::storage::MergedRecord;

const TITLE_WIDTH: usize = 40;

/// Prints the first `rows` raw records
pub fn print_raw_preview(records: &[MergedRecord], rows: usize) {
    if rows == 0 || records.is_empty() {
        return;
    }

    println!(
        "{:<width$}  {:>8}  {:<24}  {:<6}  {}",
        "Title",
        "Price",
        "Availability",
        "Rating",
        "Category",
        width = TITLE_WIDTH
    );
    for record in records.iter().take(rows) {
        println!(
            "{:<width$}  {:>8}  {:<24}  {:<6}  {}",
            truncate(&record.title, TITLE_WIDTH),
            record.price,
            truncate(&record.availability, 24),
            record.rating,
            record.category,
            width = TITLE_WIDTH
        );
    }
}

/// Prints the first `rows` cleaned records
pub fn print_cleaned_preview(records: &[CleanedRecord], rows: usize) {
    if rows == 0 || records.is_empty() {
        return;
    }

    println!(
        "{:<width$}  {:>8}  {:>5}  {:<6}  {}",
        "Title",
        "PriceNum",
        "Stock",
        "Rating",
        "Category",
        width = TITLE_WIDTH
    );
    for record in records.iter().take(rows) {
        println!(
            "{:<width$}  {:>8.2}  {:>5}  {:<6}  {}",
            truncate(&record.title, TITLE_WIDTH),
            record.price_numeric,
            record.stock_count,
            record.rating_text,
            record.category,
            width = TITLE_WIDTH
        );
    }
}

/// Shortens `text` to at most `width` characters, marking the cut with "..."
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
