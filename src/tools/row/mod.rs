//! Row Extractor
//!
//! Finds the logical row around a quantity-owned anchor and recovers card
//! number, title, counts, flags and explicit serial from it. Every field is
//! resolved by an ordered list of independent strategies; the first one that
//! yields a value wins.

mod fields;
mod flags;
mod utils;

pub use fields::*;
pub use flags::*;
pub use utils::*;

use crate::tools::tokenize::{has_letters, is_int, tokenize};
use crate::types::{ExtractOptions, Flag};
use scraper::ElementRef;

/// Class tokens that mark an element as a logical row.
pub const ROW_CLASSES: [&str; 6] = ["row", "group-item", "item", "card", "list-row", "collection-row"];

/// Tags that are rows on their own.
pub const ROW_TAGS: [&str; 2] = ["li", "tr"];

/// Number of integer tokens after the title read positionally
/// (quantity, subject points, combine needed).
const POSITIONAL_COUNTS: usize = 3;

/// Fields recovered from one row element.
#[derive(Debug, Clone)]
pub struct RowFields<'a> {
    /// The row container; its node id is the row's identity.
    pub row: ElementRef<'a>,
    pub card_number: String,
    pub title: String,
    pub quantity_owned: u32,
    pub subject_points: u32,
    pub combine_needed: u32,
    pub physical: Flag,
    pub locked: Flag,
    pub wishlist: Flag,
    /// Explicit `#n/denom` serial, empty when the row shows none.
    pub serial: String,
    pub raw_text: String,
}

/// Card number and title found by token position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Positional {
    pub card_number: Option<String>,
    pub title: Option<String>,
    /// Up to three integers after the title, in order.
    pub counts: Vec<u32>,
}

/// Read card number, title and trailing counts from a row's tokens.
///
/// Card number is the first pure integer token, title the next token with a
/// letter after it; counts are the integer tokens after the title.
pub fn positional_fields(tokens: &[String]) -> Positional {
    let Some(card_idx) = tokens.iter().position(|t| is_int(t)) else {
        return Positional::default();
    };
    let title_idx = tokens[card_idx + 1..]
        .iter()
        .position(|t| has_letters(t))
        .map(|offset| card_idx + 1 + offset);

    let counts = match title_idx {
        Some(idx) => tokens[idx + 1..]
            .iter()
            .filter(|t| is_int(t))
            .take(POSITIONAL_COUNTS)
            .map(|t| coerce_int(t))
            .collect(),
        None => Vec::new(),
    };

    Positional {
        card_number: Some(tokens[card_idx].clone()),
        title: title_idx.map(|idx| tokens[idx].clone()),
        counts,
    }
}

/// True when an element reads as one logical row.
pub fn looks_like_row(el: ElementRef<'_>) -> bool {
    let value = el.value();
    if value.attr("role") == Some("row") {
        return true;
    }
    if ROW_TAGS.contains(&value.name()) {
        return true;
    }
    value
        .classes()
        .any(|class| ROW_CLASSES.iter().any(|row| row.eq_ignore_ascii_case(class)))
}

/// Climb from `anchor` to the first row-looking element, stopping at `group`.
///
/// Without a row boundary the anchor's parent is used, unless that parent is
/// the group itself, in which case no row can be established.
pub fn find_row_container<'a>(anchor: ElementRef<'a>, group: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut current = Some(anchor);
    while let Some(el) = current {
        if el.id() == group.id() {
            break;
        }
        if looks_like_row(el) {
            return Some(el);
        }
        current = el.parent().and_then(ElementRef::wrap);
    }
    anchor
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|parent| parent.id() != group.id())
}

/// Quantity-owned anchors inside a group, in document order.
pub fn find_anchors<'a>(group: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    group
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| label_of(*el).map(|l| FieldKey::QtyOwned.matches(l)).unwrap_or(false))
        .collect()
}

/// First strategy that yields a value.
fn first_of<T>(strategies: &[&dyn Fn() -> Option<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy())
}

/// Count from a labelled element: its value first, then digits in the label.
fn labelled_count(hit: Option<LabelHit<'_>>) -> Option<u32> {
    let hit = hit?;
    let from_value = || hit.value().and_then(|v| first_int(&v));
    let from_label = || first_int(hit.label);
    first_of(&[&from_value, &from_label])
}

/// Explicit serial from a labelled element's text or value attributes.
fn labelled_serial(hit: Option<LabelHit<'_>>) -> Option<String> {
    let hit = hit?;
    let candidates = [
        Some(text_of(hit.element)),
        value_attr_of(hit.element, &["value", "data-value", "data-serial"]).map(str::to_string),
        Some(hit.label.to_string()),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|text| explicit_serial(&text))
}

/// Extract every field from an established row element.
///
/// Returns `None` when the row has no card number or no title.
pub fn extract_row_fields<'a>(row: ElementRef<'a>, opts: &ExtractOptions) -> Option<RowFields<'a>> {
    let tokens = tokenize(row);
    let positional = positional_fields(&tokens);
    let card_number = positional.card_number.clone()?;
    let title = positional.title.clone()?;

    let elements: Vec<ElementRef<'a>> = row.descendants().skip(1).filter_map(ElementRef::wrap).collect();
    let hit = |key: FieldKey| find_labelled(&elements, key);
    let by_position = |slot: usize| positional.counts.get(slot).copied();

    let quantity_owned = first_of(&[&|| labelled_count(hit(FieldKey::QtyOwned)), &|| by_position(0)]);
    let subject_points = first_of(&[&|| labelled_count(hit(FieldKey::SubjectPoints)), &|| by_position(1)]);
    let combine_needed = first_of(&[&|| labelled_count(hit(FieldKey::Combine)), &|| by_position(2)]);

    let raw_text = tokens.join(" ");
    let serial = first_of(&[&|| labelled_serial(hit(FieldKey::Serial)), &|| explicit_serial(&raw_text)])
        .unwrap_or_default();

    let (physical, locked, wishlist) = if opts.icon_flags {
        (
            physical_flag(hit(FieldKey::Physical), opts.physical_checkmark_means_yes),
            locked_flag(hit(FieldKey::Locked)),
            wishlist_flag(hit(FieldKey::Wishlist)),
        )
    } else {
        (Flag::Unset, Flag::Unset, Flag::Unset)
    };

    Some(RowFields {
        row,
        card_number,
        title,
        quantity_owned: quantity_owned.unwrap_or(0),
        subject_points: subject_points.unwrap_or(0),
        combine_needed: combine_needed.unwrap_or(0),
        physical,
        locked,
        wishlist,
        serial,
        raw_text,
    })
}

/// Extract a collection row from its quantity-owned anchor.
///
/// `None` when no row container can be established or the row lacks a card
/// number or title.
pub fn extract_row<'a>(
    anchor: ElementRef<'a>,
    group: ElementRef<'a>,
    opts: &ExtractOptions,
) -> Option<RowFields<'a>> {
    let row = find_row_container(anchor, group)?;
    extract_row_fields(row, opts)
}

/// Extract a checklist row: card number, title and text only.
pub fn extract_checklist_row<'a>(row: ElementRef<'a>) -> Option<RowFields<'a>> {
    let tokens = tokenize(row);
    let positional = positional_fields(&tokens);
    Some(RowFields {
        row,
        card_number: positional.card_number?,
        title: positional.title?,
        quantity_owned: 0,
        subject_points: 0,
        combine_needed: 0,
        physical: Flag::Unset,
        locked: Flag::Unset,
        wishlist: Flag::Unset,
        serial: String::new(),
        raw_text: tokens.join(" "),
    })
}
