//! Group/Header Extractor

mod rarity;
mod tests;

pub use rarity::*;

use crate::tools::clean::normalize_whitespace;
use crate::tools::tokenize::is_int;
use crate::types::GroupHeader;
use once_cell::sync::Lazy;
use regex::Regex;

/// Separator between set name and subset/insert name in a group header.
pub const SUBSET_SEPARATOR: &str = " - ";

static YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:20\d{2}|19\d{2})(?:-\d{2})?\b").expect("valid regex"));

/// Extract the header triple (plus header-level rarity) from a group's tokens.
///
/// The header is every token before the first pure integer (the first card
/// number), joined with single spaces.
///
/// # Examples
/// ```
/// use epack_export::tools::header::extract_header;
///
/// let tokens: Vec<String> = ["2024-25 SP Game Used Hockey Gold Parallel - Legends", "12", "Connor Bedard"]
///     .iter().map(|s| s.to_string()).collect();
/// let header = extract_header(&tokens);
/// assert_eq!(header.set, "2024-25 SP Game Used Hockey Gold Parallel");
/// assert_eq!(header.subset_or_insert, "Legends");
/// assert_eq!(header.year, "2024-25");
/// ```
pub fn extract_header(tokens: &[String]) -> GroupHeader {
    let (set, subset_or_insert) = split_header(&raw_header(tokens));
    let year = find_year(&set);
    let rarity = infer_rarity(&set, &subset_or_insert, "");
    GroupHeader {
        set,
        subset_or_insert,
        year,
        rarity,
    }
}

/// Header text: tokens up to (not including) the first card number.
pub fn raw_header(tokens: &[String]) -> String {
    let end = tokens
        .iter()
        .position(|t| is_int(t))
        .unwrap_or(tokens.len());
    normalize_whitespace(&tokens[..end].join(" "))
}

/// Split `"<set> - <subset>"` on the first separator.
///
/// Later separators stay inside the subset.
pub fn split_header(header: &str) -> (String, String) {
    match header.split_once(SUBSET_SEPARATOR) {
        Some((set, subset)) => (set.trim().to_string(), subset.trim().to_string()),
        None => (header.trim().to_string(), String::new()),
    }
}

/// First 4-digit year (with optional `-YY` season suffix) in the text.
pub fn find_year(text: &str) -> String {
    YEAR_REGEX
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
