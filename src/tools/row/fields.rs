use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

/// Attributes that carry a field's tooltip/label, in lookup order.
pub const LABEL_ATTRS: [&str; 5] = [
    "data-tooltip",
    "aria-label",
    "title",
    "data-original-title",
    "data-bs-original-title",
];

/// Attributes holding a raw value when the element has no text.
pub const VALUE_ATTRS: [&str; 2] = ["data-value", "data-count"];

/// Row fields discoverable through a tooltip/label attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    QtyOwned,
    SubjectPoints,
    Combine,
    Physical,
    Locked,
    Wishlist,
    Serial,
}

static QTY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)qty\s*owned").expect("valid regex"));
static SUBJECT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)subject\s*points?").expect("valid regex"));
static COMBINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)combine|qty\s*needed\s*to\s*combine|needed\s*to\s*combine|to\s*combine|combine\s*needed|pieces\s*needed",
    )
    .expect("valid regex")
});
static PHYSICAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)physical").expect("valid regex"));
static LOCKED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)locked").expect("valid regex"));
static WISHLIST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)wishlist|heart").expect("valid regex"));
static SERIAL_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)serial|numbered").expect("valid regex"));

impl FieldKey {
    pub fn regex(&self) -> &'static Regex {
        match self {
            Self::QtyOwned => &QTY_REGEX,
            Self::SubjectPoints => &SUBJECT_REGEX,
            Self::Combine => &COMBINE_REGEX,
            Self::Physical => &PHYSICAL_REGEX,
            Self::Locked => &LOCKED_REGEX,
            Self::Wishlist => &WISHLIST_REGEX,
            Self::Serial => &SERIAL_KEY_REGEX,
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        self.regex().is_match(label)
    }
}

/// First non-empty tooltip/label attribute of an element.
pub fn label_of<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    LABEL_ATTRS
        .iter()
        .filter_map(|name| el.value().attr(name))
        .map(str::trim)
        .find(|v| !v.is_empty())
}

/// First non-empty value attribute of an element.
pub fn value_attr_of<'a>(el: ElementRef<'a>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| el.value().attr(name))
        .map(str::trim)
        .find(|v| !v.is_empty())
}

/// Trimmed text content of an element.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// An element whose label matched a field key.
#[derive(Debug, Clone, Copy)]
pub struct LabelHit<'a> {
    pub element: ElementRef<'a>,
    pub label: &'a str,
}

impl<'a> LabelHit<'a> {
    /// Element text, else its `data-value`/`data-count` attribute.
    pub fn value(&self) -> Option<String> {
        let text = text_of(self.element);
        if !text.is_empty() {
            return Some(text);
        }
        value_attr_of(self.element, &VALUE_ATTRS).map(str::to_string)
    }
}

/// First element (in document order) whose label matches `key`.
pub fn find_labelled<'a>(elements: &[ElementRef<'a>], key: FieldKey) -> Option<LabelHit<'a>> {
    elements.iter().find_map(|el| {
        let label = label_of(*el)?;
        key.matches(label).then_some(LabelHit { element: *el, label })
    })
}
