use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

static ORG_NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".h2").unwrap());
static USER_NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".p-name").unwrap());
static ORG_AVATAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.flex-shrink-0:nth-child(1)").unwrap());
static USER_AVATAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.avatar.avatar-user").unwrap());

/// Owner identity lifted from a profile page.
#[derive(Debug, Clone, Default)]
pub struct AuthorProfile {
    pub author: Option<String>,
    pub image: Option<String>,
}

pub fn parse(html: &str) -> AuthorProfile {
    let doc = Html::parse_document(html);
    AuthorProfile {
        author: display_name(&doc),
        image: avatar(&doc),
    }
}

/// Owner display name, trimmed. Organization pages carry it in an `.h2`
/// heading, individual pages in the `.p-name` vcard element; the
/// organization form wins when both are non-empty.
pub fn display_name(doc: &Html) -> Option<String> {
    let org = super::select_text(doc, &ORG_NAME);
    let user = super::select_text(doc, &USER_NAME);
    debug!(?org, ?user, "author name candidates");
    org.or(user)
}

/// Owner avatar URL, organization form first.
pub fn avatar(doc: &Html) -> Option<String> {
    let org = super::select_attr(doc, &ORG_AVATAR, "src");
    let user = super::select_attr(doc, &USER_AVATAR, "src");
    debug!(?org, ?user, "avatar candidates");
    org.or(user)
}

// ── Tests ──
