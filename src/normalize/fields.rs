//! Text-to-number conversions for scraped fields

use regex::Regex;
use std::sync::LazyLock;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]+").expect("hardcoded regex pattern is valid"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("hardcoded regex pattern is valid"));

/// Parses a price by dropping every character that is not a digit or a dot
///
/// `"£51.77"` parses to `51.77`. Returns None when nothing numeric remains
/// or the remainder is not a valid number (e.g. `"1.2.3"`). The result is
/// never negative since `-` is stripped with everything else.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC.replace_all(text, "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Extracts the first run of digits from an availability string
///
/// `"In stock (22 available)"` yields 22; text without digits yields 0. A
/// run too long for `u64` saturates at `u64::MAX`.
pub fn extract_stock(text: &str) -> u64 {
    DIGIT_RUN
        .find(text)
        .map(|run| run.as_str().parse().unwrap_or(u64::MAX))
        .unwrap_or(0)
}
