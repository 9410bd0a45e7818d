//! Mailsweep main entry point
//!
//! Command-line harness for the email-discovery crawler.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mailsweep::config::{load_config_with_hash, CrawlPolicies};
use mailsweep::crawler::{crawl, HttpFetcher, LinkParser, PageFetcher, ScraperParser};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Mailsweep: a polite email-discovery crawler
///
/// Crawls breadth-first from a seed page, collecting the contact emails
/// reachable within the given link depth while respecting robots.txt,
/// per-domain rate limits, and page quotas.
#[derive(Parser, Debug)]
#[command(name = "mailsweep")]
#[command(version = "1.0.0")]
#[command(about = "A polite email-discovery crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Maximum link depth to follow below the seed (-1 = unlimited)
    #[arg(short, long, default_value_t = 2)]
    depth: i32,

    /// Path to a TOML configuration file (takes precedence over --preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Politeness preset to crawl with
    #[arg(long, value_enum, default_value = "default")]
    preset: Preset,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// 1s between requests, unbounded pages, robots.txt respected
    Default,
    /// 2s between requests, 100 pages per domain, robots.txt respected
    Conservative,
    /// 100ms between requests, unbounded pages, robots.txt ignored
    Aggressive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let policies = resolve_policies(&cli)?;
    tracing::info!(
        "Crawling {} to depth {} as '{}'",
        cli.seed,
        cli.depth,
        policies.user_agent
    );

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&policies)?);
    let parser: Arc<dyn LinkParser> = Arc::new(ScraperParser);

    let emails = crawl(fetcher, parser, &cli.seed, cli.depth, policies).await?;

    let mut sorted: Vec<String> = emails.into_iter().collect();
    sorted.sort();

    println!("Found {} distinct emails:", sorted.len());
    for email in &sorted {
        println!("  {}", email);
    }

    Ok(())
}

/// Builds the crawl policies from the CLI arguments
///
/// A config file overrides the preset entirely; without one, the preset is
/// used as-is.
fn resolve_policies(cli: &Cli) -> anyhow::Result<CrawlPolicies> {
    if let Some(path) = &cli.config {
        let (config, hash) = load_config_with_hash(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
        return Ok(config.crawl);
    }

    Ok(match cli.preset {
        Preset::Default => CrawlPolicies::default(),
        Preset::Conservative => CrawlPolicies::conservative(),
        Preset::Aggressive => CrawlPolicies::aggressive(),
    })
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mailsweep=info,warn"),
            1 => EnvFilter::new("mailsweep=debug,info"),
            2 => EnvFilter::new("mailsweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
