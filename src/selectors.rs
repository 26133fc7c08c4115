//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for collection-view group containers.
pub static GROUP_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".group").expect("valid group selector"));

/// Selector for checklist group candidates.
pub static CHECKLIST_GROUP_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".group, .checklist-group, section, .accordion, .list, .cards, .content")
        .expect("valid checklist group selector")
});

/// Selector for checklist row candidates.
pub static CHECKLIST_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[role="row"], li, tr, .row, .checklist-item, .item"#)
        .expect("valid checklist row selector")
});
