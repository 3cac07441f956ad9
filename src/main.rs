mod crawler;
mod extract;
mod fetch;
mod model;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use crawler::CrawlConfig;
use fetch::HttpFetcher;

#[derive(Parser)]
#[command(name = "denox_scraper", about = "deno.land/x module directory scraper")]
struct Cli {
    /// Number of listing pages to crawl
    #[arg(short = 'n', long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,

    /// Pause between successive requests, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Accept header sent on module detail-page fetches
    #[arg(long, default_value = crawler::BROWSER_ACCEPT)]
    accept: String,

    /// Output file for the scraped entries
    #[arg(short, long, default_value = "output.json")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let config = CrawlConfig {
        pages: cli.pages,
        accept: cli.accept,
        ..CrawlConfig::default()
    };
    let fetcher = HttpFetcher::new(cli.delay_ms)?;

    println!("Crawling {} listing pages...", config.pages);
    let (entries, stats) = crawler::crawl(&fetcher, &config).await;

    let json = serde_json::to_string_pretty(&entries)?;
    std::fs::write(&cli.out, json)
        .with_context(|| format!("Failed to write {}", cli.out.display()))?;

    println!(
        "Done: {} entries from {} pages ({} skipped), {} with repo, {} with author.",
        stats.entries, stats.pages_ok, stats.pages_skipped, stats.repos, stats.authors
    );
    println!("Wrote {}", cli.out.display());

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
