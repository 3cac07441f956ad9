use std::sync::LazyLock;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::extract::author::{self, AuthorProfile};
use crate::extract::{listing, module};
use crate::fetch::PageFetcher;
use crate::model::Entry;

pub const ORIGIN: &str = "https://deno.land";
pub const LISTING_BASE: &str = "https://deno.land/x";
pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

static OWNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://[^/]+/[^/?#]+)").unwrap());

/// Where the crawl points. Listing pages live at `{listing_base}?page=N`;
/// detail paths from the listing resolve against `origin`.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub origin: String,
    pub listing_base: String,
    pub pages: u32,
    pub accept: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            origin: ORIGIN.to_string(),
            listing_base: LISTING_BASE.to_string(),
            pages: 5,
            accept: BROWSER_ACCEPT.to_string(),
        }
    }
}

/// Counters reported after a crawl.
#[derive(Debug, Default)]
pub struct CrawlStats {
    pub pages_ok: usize,
    pub pages_skipped: usize,
    pub entries: usize,
    pub repos: usize,
    pub authors: usize,
}

/// Fields resolved from a module's detail page and, when a repository
/// link was found there, its owner's profile page.
#[derive(Debug, Default)]
struct Resolved {
    href: Option<String>,
    package: Option<String>,
    repo: Option<String>,
    author: Option<String>,
    image: Option<String>,
}

/// Crawl every configured listing page in order, resolving each entry's
/// detail and owner pages before the next entry begins. Failures degrade
/// to partial entries; the run itself never aborts.
pub async fn crawl(fetcher: &dyn PageFetcher, config: &CrawlConfig) -> (Vec<Entry>, CrawlStats) {
    let mut entries = Vec::new();
    let mut stats = CrawlStats::default();

    let pb = ProgressBar::new(config.pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages {msg}")
            .unwrap()
            .progress_chars("=> "),
    );

    for page in 1..=config.pages {
        let url = format!("{}?page={}", config.listing_base, page);
        let body = match fetcher.fetch(&url, None).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Skipping listing page {}: {:#}", page, e);
                stats.pages_skipped += 1;
                pb.inc(1);
                continue;
            }
        };
        stats.pages_ok += 1;

        for item in listing::items(&body) {
            let mut entry = Entry {
                name: item.name,
                description: item.description,
                ..Entry::default()
            };
            if let Some(name) = &entry.name {
                pb.set_message(name.clone());
            }

            if let Some(path) = &item.detail_path {
                match resolve_module(fetcher, config, path).await {
                    Ok(resolved) => merge(&mut entry, resolved),
                    Err(e) => warn!("Module {} left partial: {:#}", path, e),
                }
            }

            if entry.repo.is_some() {
                stats.repos += 1;
            }
            if entry.author.is_some() {
                stats.authors += 1;
            }
            entries.push(entry);
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    stats.entries = entries.len();
    info!(
        "Crawled {} pages ({} skipped): {} entries, {} repos, {} authors",
        stats.pages_ok, stats.pages_skipped, stats.entries, stats.repos, stats.authors
    );
    (entries, stats)
}

/// Resolve one module's detail page. Transport failure is the caller's
/// problem; a page that parses but matches nothing resolves to an empty
/// mapping.
async fn resolve_module(
    fetcher: &dyn PageFetcher,
    config: &CrawlConfig,
    detail_path: &str,
) -> Result<Resolved> {
    let url = format!("{}{}", config.origin, detail_path);
    let body = fetcher
        .fetch(&url, Some(&config.accept))
        .await
        .with_context(|| format!("Failed to fetch module page {}", url))?;
    let page = module::parse(&body);

    let mut resolved = Resolved::default();
    if let Some(path) = page.package_path {
        let package = format!("{}{}", config.origin, path);
        resolved.href = Some(package.clone());
        resolved.package = Some(package);
    }
    if let Some(repo) = page.repo {
        let profile = resolve_author(fetcher, &repo).await;
        resolved.repo = Some(repo);
        resolved.author = profile.author;
        resolved.image = profile.image;
    }
    Ok(resolved)
}

/// Resolve the repository owner's display name and avatar. Best effort:
/// any failure comes back as an empty profile.
async fn resolve_author(fetcher: &dyn PageFetcher, repo_url: &str) -> AuthorProfile {
    let Some(url) = owner_profile_url(repo_url) else {
        debug!("No owner segment in repo URL {}", repo_url);
        return AuthorProfile::default();
    };
    match fetcher.fetch(&url, None).await {
        Ok(body) => author::parse(&body),
        Err(e) => {
            warn!("Owner profile {} unavailable: {:#}", url, e);
            AuthorProfile::default()
        }
    }
}

/// Owner profile URL: the repository host plus the first path segment,
/// with the repository-name segment and everything after it dropped.
fn owner_profile_url(repo_url: &str) -> Option<String> {
    OWNER_RE
        .captures(repo_url)
        .map(|caps| caps[1].to_string())
}

/// Fold resolver findings into the entry; resolver fields win.
fn merge(entry: &mut Entry, resolved: Resolved) {
    if resolved.href.is_some() {
        entry.href = resolved.href;
    }
    if resolved.package.is_some() {
        entry.package = resolved.package;
    }
    if resolved.repo.is_some() {
        entry.repo = resolved.repo;
    }
    if resolved.author.is_some() {
        entry.author = resolved.author;
    }
    if resolved.image.is_some() {
        entry.image = resolved.image;
    }
}

// ── Tests ──
