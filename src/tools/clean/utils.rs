//! Text cleaning helpers
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static LINE_BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid regex"));

/// Normalize whitespace by collapsing runs of whitespace and trimming.
///
/// - Multiple spaces → single space
/// - Tabs and newlines → single space
/// - Trim leading/trailing whitespace
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Replace each line break with one space; other whitespace is untouched.
pub fn collapse_line_breaks(text: &str) -> String {
    LINE_BREAK_REGEX.replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("hello   world"), "hello world");
        assert_eq!(normalize_whitespace("  trim  me  "), "trim me");
        assert_eq!(normalize_whitespace("multiple\n\n\nlines"), "multiple lines");
        assert_eq!(normalize_whitespace("Young\u{00A0} Guns"), "Young Guns");
    }

    #[test]
    fn test_collapse_line_breaks() {
        assert_eq!(collapse_line_breaks("a\r\nb\rc\nd"), "a b c d");
        assert_eq!(collapse_line_breaks("a\n\nb"), "a  b");
    }
}
