pub mod author;
pub mod listing;
pub mod module;

use scraper::{ElementRef, Html, Selector};

/// Text of the first element matching `sel`, trimmed. Whitespace-only
/// text counts as a miss.
fn select_text(doc: &Html, sel: &Selector) -> Option<String> {
    doc.select(sel).next().and_then(element_text)
}

/// Attribute of the first element matching `sel`. Empty values count as
/// a miss.
fn select_attr(doc: &Html, sel: &Selector, attr: &str) -> Option<String> {
    doc.select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
        .filter(|v| !v.is_empty())
}

fn element_text(el: ElementRef) -> Option<String> {
    let text = el.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}
