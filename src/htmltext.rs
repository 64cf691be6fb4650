//! Small helpers for turning scraped HTML nodes into normalized text.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
        .expect("script/style regex")
});
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Space-joined, stripped text of an element and its descendants.
pub fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rendered text of a whole document, one line per text node, with
/// script/style content removed. Feeds the plain-text fallback strategy.
pub fn page_text(html: &str) -> String {
    let stripped = SCRIPT_STYLE_RE.replace_all(html, " ");
    let document = Html::parse_document(&stripped);
    document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trim and collapse internal whitespace.
pub fn collapse_ws(line: &str) -> String {
    WS_RE.replace_all(line.trim(), " ").into_owned()
}
