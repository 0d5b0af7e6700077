//! Parsing of semi-structured score-threshold text.
//!
//! Catalog thresholds come from a scrape and look like `"от 270"` or
//! `"от 245 баллов"`. A leading `"от ?"` means the source site did not
//! know the value. Dirty rows are tolerated: anything unparseable simply
//! yields `None` and the caller excludes the record from matching.

/// Placeholder marking an unknown threshold.
pub const UNKNOWN_MARKER: &str = "от ?";

/// Parse a raw threshold text into a numeric lower bound.
///
/// Returns `None` when the text carries the unknown placeholder, has
/// fewer than two whitespace-separated tokens, or when the second token
/// is not a number.
pub fn parse_threshold(raw: &str) -> Option<f64> {
    if raw.starts_with(UNKNOWN_MARKER) {
        return None;
    }
    let mut tokens = raw.split_whitespace();
    let _marker = tokens.next()?;
    tokens.next()?.parse().ok()
}
