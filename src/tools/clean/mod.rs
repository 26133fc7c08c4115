mod tests;
mod utils;

pub use utils::*;

/// Clean a value for a CSV cell.
///
/// Performs the following operations in order:
/// 1. Collapse every line break (`\r\n`, `\r`, `\n`) to a single space
/// 2. Trim leading/trailing whitespace
///
/// Interior runs of spaces are kept so the diagnostic `RawText` column stays
/// close to the page text.
///
/// # Examples
/// ```
/// use epack_export::tools::clean::clean_cell;
///
/// assert_eq!(clean_cell("  Connor\r\nBedard "), "Connor Bedard");
/// ```
pub fn clean_cell(text: &str) -> String {
    collapse_line_breaks(text).trim().to_string()
}

/// Clean all cells of a row.
pub fn clean_row(cells: &[String]) -> Vec<String> {
    cells.iter().map(|c| clean_cell(c)).collect()
}
