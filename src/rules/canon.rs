//! Key canonicalization for fuzzy rules lookup.

use crate::tools::clean::normalize_whitespace;
use crate::tools::header::term_regex;
use once_cell::sync::Lazy;
use regex::Regex;

static PUNCTUATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").expect("valid regex"));
static BASE_SET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bbase\s+set\b").expect("valid regex"));
static PARALLEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bparallel\b").expect("valid regex"));

/// Canonical form of one key segment.
///
/// Lowercases, turns punctuation into spaces, drops every "base set" token
/// and collapses whitespace. Applying it twice changes nothing.
///
/// # Examples
/// ```
/// use epack_export::rules::canonicalize;
///
/// assert_eq!(canonicalize("  2024-25 SP Game-Used  Hockey "), "2024 25 sp game used hockey");
/// assert_eq!(canonicalize("Series One Base Set"), "series one");
/// ```
pub fn canonicalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut out = PUNCTUATION_REGEX.replace_all(&lower, " ").into_owned();
    loop {
        let next = BASE_SET_REGEX.replace_all(&out, " ").into_owned();
        if next == out {
            break;
        }
        out = next;
    }
    normalize_whitespace(&out)
}

/// Canonical `"<set>|<rarity>"` lookup key.
pub fn rule_key(set: &str, rarity: &str) -> String {
    format!("{}|{}", canonicalize(set), canonicalize(rarity))
}

/// Set name with the rarity phrase and the word "parallel" removed.
///
/// Rules key on bare set names, while page headers often read
/// "<set> Gold Parallel".
pub fn clean_set(set: &str, rarity: &str) -> String {
    let mut out = set.to_string();
    if !rarity.trim().is_empty() {
        if let Ok(re) = term_regex(rarity) {
            out = re.replace_all(&out, " ").into_owned();
        }
    }
    out = PARALLEL_REGEX.replace_all(&out, " ").into_owned();
    normalize_whitespace(&out)
}
