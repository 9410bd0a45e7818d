//! Crawler module - fetching, parsing, rate limiting, and traversal
//!
//! This module contains the breadth-first crawl engine together with the
//! fetch/parse capabilities it consumes and the per-domain rate limiter that
//! gates every outgoing request.

mod engine;
mod extract;
mod fetcher;
mod limiter;
mod parser;

pub use engine::EmailCrawler;
pub use extract::EmailExtractor;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use limiter::RateLimitedFetcher;
pub use parser::{LinkParser, ScraperParser};

use crate::config::CrawlPolicies;
use crate::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// Runs a complete email-discovery crawl
///
/// This is the main entry point: it builds an [`EmailCrawler`] around the
/// given fetch and parse capabilities and walks breadth-first from the seed
/// URL down to `maximum_depth` (-1 = unbounded), returning the distinct
/// lower-cased emails found.
///
/// # Errors
///
/// Fails fast on an empty seed URL; every other failure is per-page,
/// recovered, and logged.
pub async fn crawl(
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn LinkParser>,
    seed_url: &str,
    maximum_depth: i32,
    policies: CrawlPolicies,
) -> Result<HashSet<String>> {
    EmailCrawler::new(fetcher, parser, policies)
        .crawl(seed_url, maximum_depth)
        .await
}
