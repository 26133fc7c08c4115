//! Tokenizer
//!
//! Turns an element subtree into the ordered list of trimmed text lines that
//! every other extraction step works on.


use scraper::{ElementRef, Html};

/// Elements whose text never shows up on the rendered page.
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Tokenize an element subtree.
///
/// Walks text nodes in document order (depth-first, pre-order), splits each on
/// line breaks, trims every piece and drops the empty ones. Text inside
/// `script`/`style`/`noscript`/`template` is skipped.
///
/// # Examples
/// ```
/// use epack_export::tools::tokenize::tokenize;
/// use scraper::Html;
///
/// let doc = Html::parse_fragment("<div><b>12</b>\n<i> Connor Bedard </i></div>");
/// let tokens = tokenize(doc.root_element());
/// assert_eq!(tokens, vec!["12", "Connor Bedard"]);
/// ```
pub fn tokenize(root: ElementRef<'_>) -> Vec<String> {
    let mut out = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(ElementRef::wrap)
            .map(|parent| HIDDEN_TAGS.contains(&parent.value().name()))
            .unwrap_or(false);
        if hidden {
            continue;
        }
        out.extend(
            text.split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    out
}

/// Tokenize a whole HTML fragment.
pub fn tokenize_html(html: &str) -> Vec<String> {
    let doc = Html::parse_fragment(html);
    tokenize(doc.root_element())
}

/// Space-joined token text of a subtree (readable stand-in for `innerText`).
pub fn joined_text(root: ElementRef<'_>) -> String {
    tokenize(root).join(" ")
}

/// True when the token is a non-negative integer and nothing else.
pub fn is_int(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// True when the token contains at least one ASCII letter.
pub fn has_letters(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_alphabetic())
}
