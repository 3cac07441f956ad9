use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".text-primary.font-semibold").unwrap());
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".col-span-2.text-gray-400").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// One `<li>` worth of listing data.
#[derive(Debug, Clone, Default)]
pub struct ListingItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub detail_path: Option<String>,
}

/// Every list item on a listing page, in document order.
pub fn items(html: &str) -> Vec<ListingItem> {
    let doc = Html::parse_document(html);
    doc.select(&ITEM)
        .map(|li| ListingItem {
            name: li.select(&NAME).next().and_then(super::element_text),
            description: li.select(&DESCRIPTION).next().and_then(super::element_text),
            detail_path: detail_path(li),
        })
        .collect()
}

/// First anchor's target with any query string stripped.
fn detail_path(li: ElementRef) -> Option<String> {
    li.select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.split('?').next().unwrap_or("").to_string())
        .filter(|path| !path.is_empty())
}

// ── Tests ──
