use once_cell::sync::Lazy;
use regex::Regex;

static INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static SERIAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\s*(\d+)\s*/\s*(\d+)").expect("valid regex"));

/// First embedded integer in the text.
///
/// Values too large for `u32` saturate.
pub fn first_int(text: &str) -> Option<u32> {
    INT_REGEX
        .find(text)
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
}

/// Numeric coercion used for every count column: first integer, else 0.
///
/// # Examples
/// ```
/// use epack_export::tools::row::coerce_int;
///
/// assert_eq!(coerce_int("Qty: 12 cards"), 12);
/// assert_eq!(coerce_int("none"), 0);
/// ```
pub fn coerce_int(text: &str) -> u32 {
    first_int(text).unwrap_or(0)
}

/// Explicit serial (`#<n>/<denom>`, spaces allowed) normalized to `#n/denom`.
pub fn explicit_serial(text: &str) -> Option<String> {
    SERIAL_REGEX
        .captures(text)
        .map(|caps| format!("#{}/{}", &caps[1], &caps[2]))
}
