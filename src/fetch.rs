use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;

/// HTTP access used by the crawl pipeline. Injected so tests can swap in
/// canned pages without touching the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text. `accept` is sent
    /// as the Accept header when given.
    async fn fetch(&self, url: &str, accept: Option<&str>) -> Result<String>;
}

/// Production fetcher over a shared reqwest client. Redirects are followed
/// (client default) and bodies are read whatever the HTTP status; only
/// transport-level errors surface as failures.
pub struct HttpFetcher {
    client: reqwest::Client,
    delay: Duration,
    primed: AtomicBool,
}

impl HttpFetcher {
    pub fn new(delay_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            delay: Duration::from_millis(delay_ms),
            primed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, accept: Option<&str>) -> Result<String> {
        // Fixed pause between successive requests, never before the first
        if !self.delay.is_zero() && self.primed.swap(true, Ordering::Relaxed) {
            tokio::time::sleep(self.delay).await;
        }

        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let body = request
            .send()
            .await
            .with_context(|| format!("Request failed: {}", url))?
            .text()
            .await
            .with_context(|| format!("Failed to read body: {}", url))?;
        Ok(body)
    }
}
