//! Decision tables for the Physical / Locked / Wishlist columns.
//!
//! Each flag looks at the matched element's label, text, class tokens and
//! ARIA state. No matching element means "No".

use super::fields::{text_of, LabelHit};
use crate::types::Flag;
use once_cell::sync::Lazy;
use regex::Regex;

const CHECKMARKS: [char; 4] = ['✓', '✔', '☑', '✅'];
const HEARTS: [char; 2] = ['♥', '❤'];
const LOCK_CLOSED: char = '🔒';

const STATE_ATTRS: [&str; 4] = ["aria-pressed", "aria-checked", "data-state", "data-status"];

static PHYSICAL_NO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:no|not|false|off|none)\b").expect("valid regex"));
static PHYSICAL_YES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:yes|true|green)\b").expect("valid regex"));

static LOCKED_NO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:unlocked|not\s+locked|no|false|off)\b").expect("valid regex")
});
static LOCKED_YES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:yes|true|on|active|is\s+locked)\b").expect("valid regex")
});

static WISHLIST_NO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:add\s+to|not\s+in|not\s+on|no|false|off)\b").expect("valid regex")
});
static WISHLIST_YES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:yes|true|on|active|filled|remove\s+from|in\s+wishlist|wishlisted)\b")
        .expect("valid regex")
});

/// Lowercased label + text + classes + ARIA state of the matched element.
fn state_text(hit: &LabelHit<'_>) -> String {
    let el = hit.element.value();
    let mut parts = vec![hit.label.to_string(), text_of(hit.element)];
    parts.extend(el.classes().map(str::to_string));
    parts.extend(
        STATE_ATTRS
            .iter()
            .filter_map(|name| el.attr(name))
            .map(str::to_string),
    );
    parts.join(" ").to_lowercase()
}

/// Physical copy status.
///
/// "pending" wins, then explicit negatives, then "yes"/"green". A bare
/// checkmark glyph maps to Yes only when `checkmark_means_yes` is set.
pub fn physical_flag(hit: Option<LabelHit<'_>>, checkmark_means_yes: bool) -> Flag {
    let Some(hit) = hit else {
        return Flag::No;
    };
    let state = state_text(&hit);
    if state.contains("pending") {
        Flag::Pending
    } else if PHYSICAL_NO.is_match(&state) {
        Flag::No
    } else if PHYSICAL_YES.is_match(&state) {
        Flag::Yes
    } else if state.contains(&CHECKMARKS[..]) && checkmark_means_yes {
        Flag::Yes
    } else {
        Flag::No
    }
}

/// Locked status. A bare "Locked" label counts as Yes.
pub fn locked_flag(hit: Option<LabelHit<'_>>) -> Flag {
    let Some(hit) = hit else {
        return Flag::No;
    };
    let state = state_text(&hit);
    if LOCKED_NO.is_match(&state) {
        Flag::No
    } else if LOCKED_YES.is_match(&state)
        || hit.label.eq_ignore_ascii_case("locked")
        || state.contains(LOCK_CLOSED)
    {
        Flag::Yes
    } else {
        Flag::No
    }
}

/// Wishlist status. "Add to wishlist" is No; a filled heart is Yes.
pub fn wishlist_flag(hit: Option<LabelHit<'_>>) -> Flag {
    let Some(hit) = hit else {
        return Flag::No;
    };
    let state = state_text(&hit);
    if WISHLIST_NO.is_match(&state) {
        Flag::No
    } else if WISHLIST_YES.is_match(&state) || state.contains(&HEARTS[..]) {
        Flag::Yes
    } else {
        Flag::No
    }
}
