use std::sync::LazyLock;

use scraper::{Html, Selector};

static PACKAGE_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.inline-block:nth-child(3)").unwrap());
static REPO_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.link.truncate").unwrap());

/// Links lifted from a module's detail page.
#[derive(Debug, Clone, Default)]
pub struct ModulePage {
    pub package_path: Option<String>,
    pub repo: Option<String>,
}

pub fn parse(html: &str) -> ModulePage {
    let doc = Html::parse_document(html);
    ModulePage {
        package_path: package_path(&doc),
        repo: repo_link(&doc),
    }
}

/// Package anchor target with the `@version` suffix and everything after
/// it removed. Unset when the anchor is missing.
pub fn package_path(doc: &Html) -> Option<String> {
    super::select_attr(doc, &PACKAGE_ANCHOR, "href")
        .map(|href| href.split('@').next().unwrap_or("").to_string())
        .filter(|path| !path.is_empty())
}

/// Repository anchor target, taken verbatim.
pub fn repo_link(doc: &Html) -> Option<String> {
    super::select_attr(doc, &REPO_ANCHOR, "href")
}

// ── Tests ──
