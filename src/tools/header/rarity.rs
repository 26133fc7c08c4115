use crate::tools::clean::normalize_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;

/// Rarity/parallel terms in precedence order.
///
/// Colored and named parallels come first, then insert families, and the
/// generic "Parallel" is last: when a header says "Gold Parallel" the answer
/// is "Gold".
pub const RARITY_TERMS: &[&str] = &[
    // colors
    "Gold",
    "Blue",
    "Green",
    "Red",
    "Black",
    "Purple",
    "Orange",
    "Teal",
    "Silver",
    "Bronze",
    "Rainbow",
    "Spectrum",
    // named parallels / programs
    "Exclusive",
    "FX",
    "Canvas",
    "Ice",
    "Retro",
    "Debut",
    // insert families
    "Young Guns",
    "Authentic Rookies",
    "Rookie Sweaters",
    "HOF Marks",
    "Banner Year",
    "Net Cord",
    "New Grooves",
    "All-Star",
    "Mascot",
    "Legends",
    "Fabrics",
    "Jersey",
    "Materials",
    "Patch",
    "Die-Cut",
    "Checklist",
    "Rookie",
    "Insert",
    // generic fallback
    "Parallel",
];

/// Color words folded to their capitalized form.
const COLOR_TERMS: &[&str] = &[
    "Gold", "Blue", "Green", "Red", "Black", "Purple", "Orange", "Teal", "Silver", "Bronze",
];

struct RarityMatcher {
    term: &'static str,
    regex: Regex,
}

static RARITY_MATCHERS: Lazy<Vec<RarityMatcher>> = Lazy::new(|| {
    RARITY_TERMS
        .iter()
        .map(|term| RarityMatcher {
            term,
            regex: term_regex(term).expect("valid rarity regex"),
        })
        .collect()
});

static TRAILING_PARALLEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bparallel$").expect("valid regex"));

/// Case-insensitive pattern for a term, tolerant of extra (or missing)
/// whitespace between its words.
pub fn term_pattern(term: &str) -> String {
    let words: Vec<String> = term.split_whitespace().map(regex::escape).collect();
    format!(r"(?i)\b{}\b", words.join(r"\s*"))
}

/// Compile [`term_pattern`].
pub fn term_regex(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&term_pattern(term))
}

/// Infer the rarity/parallel label from set, subset and title text.
///
/// Terms are tried in [`RARITY_TERMS`] order against the subset, title and
/// set (in that order); the first hit wins. Returns an empty string when no
/// term matches.
///
/// # Examples
/// ```
/// use epack_export::tools::header::infer_rarity;
///
/// assert_eq!(infer_rarity("2024-25 SP Game Used Hockey Gold Parallel", "Legends", "Connor Bedard"), "Gold");
/// assert_eq!(infer_rarity("2024-25 Series One", "", "Wayne Gretzky"), "");
/// ```
pub fn infer_rarity(set: &str, subset: &str, title: &str) -> String {
    let source = [subset, title, set].join(" • ");
    RARITY_MATCHERS
        .iter()
        .find_map(|m| m.regex.find(&source).map(|hit| (m.term, hit.as_str())))
        .map(|(term, matched)| {
            canonical_rarity(matched).unwrap_or_else(|| term.to_string())
        })
        .unwrap_or_default()
}

/// Fold a matched rarity phrase to its canonical spelling.
///
/// - any case variant of a color word → `Title Case` (`"GOLD"` → `"Gold"`)
/// - anything ending in "parallel" → `"Parallel"`
/// - a known term typed with different case/spacing → the term itself
///
/// Returns `None` for text that is none of those.
pub fn canonical_rarity(text: &str) -> Option<String> {
    let text = normalize_whitespace(text);
    if let Some(color) = COLOR_TERMS.iter().find(|c| c.eq_ignore_ascii_case(&text)) {
        return Some(color.to_string());
    }
    if TRAILING_PARALLEL_REGEX.is_match(&text) {
        return Some("Parallel".to_string());
    }
    let squashed: String = text.split_whitespace().collect();
    RARITY_TERMS
        .iter()
        .find(|term| {
            let term_squashed: String = term.split_whitespace().collect();
            term_squashed.eq_ignore_ascii_case(&squashed)
        })
        .map(|term| term.to_string())
}

/// Canonical form if known, otherwise the whitespace-normalized input.
pub fn normalize_rarity(text: &str) -> String {
    canonical_rarity(text).unwrap_or_else(|| normalize_whitespace(text))
}
