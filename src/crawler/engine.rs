//! Crawl engine - breadth-first traversal orchestration
//!
//! The engine owns the frontier queue and drives one traversal: it pops a
//! (url, depth) pair, runs it through the politeness gates (visited set,
//! depth limit, robots.txt, per-domain page quota, rate limiter), fetches and
//! parses the page, collects validated emails, and enqueues unseen child
//! links one level deeper. A single bad page never aborts the traversal.

use crate::config::CrawlPolicies;
use crate::crawler::extract::EmailExtractor;
use crate::crawler::limiter::RateLimitedFetcher;
use crate::crawler::{LinkParser, PageFetcher};
use crate::robots::RobotsCache;
use crate::url::{is_crawlable_href, normalize_url, page_domain, resolve_href};
use crate::{Result, SweepError};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

/// A discovered URL waiting in the frontier queue
#[derive(Debug, Clone)]
struct FrontierEntry {
    url: String,
    depth: i32,
}

/// What happened to one dequeued frontier entry
#[derive(Debug)]
enum PageOutcome {
    /// Body retrieved and parsed
    Fetched { new_emails: usize, new_links: usize },

    /// Dropped by one of the politeness gates, or nothing to fetch
    Skipped(SkipReason),

    /// A per-page error, recovered by moving on to the next entry
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    AlreadyVisited,
    DepthExceeded,
    RobotsDisallowed,
    QuotaExceeded,
    NoContent,
}

/// Breadth-first email-discovery crawler
///
/// Holds the immutable policies plus the shared politeness state (robots
/// cache, rate limiter). Per-traversal state (visited set, frontier, result
/// set, page counters) lives inside each [`Self::crawl`] call.
pub struct EmailCrawler {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn LinkParser>,
    policies: CrawlPolicies,
    robots: RobotsCache,
    extractor: EmailExtractor,
}

impl EmailCrawler {
    /// Creates a crawler from the injected fetch and parse capabilities
    ///
    /// When the policies carry a non-zero delay, the fetcher is wrapped in the
    /// per-domain rate limiter; robots.txt requests go through the same gate,
    /// so they count toward a domain's request spacing like any other fetch.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: Arc<dyn LinkParser>,
        policies: CrawlPolicies,
    ) -> Self {
        let fetcher: Arc<dyn PageFetcher> = if policies.delay_between_requests_ms > 0 {
            Arc::new(RateLimitedFetcher::new(
                fetcher,
                Duration::from_millis(policies.delay_between_requests_ms),
            ))
        } else {
            fetcher
        };

        let robots = RobotsCache::new(fetcher.clone());

        Self {
            fetcher,
            parser,
            policies,
            robots,
            extractor: EmailExtractor::new(),
        }
    }

    /// Crawls breadth-first from the seed and returns the distinct emails
    ///
    /// `maximum_depth` bounds how many link levels below the seed are
    /// followed; -1 removes the bound. The returned set is lower-cased and
    /// duplicate-free with no guaranteed enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::EmptySeed`] when the seed URL is empty. Per-page
    /// failures (fetch errors, parse errors, unresolvable links) are logged
    /// and skipped, never surfaced.
    pub async fn crawl(&self, seed_url: &str, maximum_depth: i32) -> Result<HashSet<String>> {
        if seed_url.trim().is_empty() {
            return Err(SweepError::EmptySeed);
        }

        tracing::info!(
            "Starting crawl from {} (maximum depth {})",
            seed_url,
            maximum_depth
        );
        let start_time = std::time::Instant::now();

        let mut emails: HashSet<String> = HashSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut pages_per_domain: HashMap<String, u32> = HashMap::new();
        let mut frontier: VecDeque<FrontierEntry> = VecDeque::new();

        frontier.push_back(FrontierEntry {
            url: normalize_url(seed_url),
            depth: 0,
        });

        while let Some(entry) = frontier.pop_front() {
            let outcome = self
                .visit(
                    &entry,
                    maximum_depth,
                    &mut visited,
                    &mut pages_per_domain,
                    &mut emails,
                    &mut frontier,
                )
                .await;

            match outcome {
                PageOutcome::Fetched {
                    new_emails,
                    new_links,
                } => {
                    tracing::debug!(
                        "Fetched {} at depth {}: {} new emails, {} links queued",
                        entry.url,
                        entry.depth,
                        new_emails,
                        new_links
                    );
                }
                PageOutcome::Skipped(SkipReason::RobotsDisallowed) => {
                    tracing::info!("URL {} disallowed by robots.txt", entry.url);
                }
                PageOutcome::Skipped(reason) => {
                    tracing::debug!("Skipped {}: {:?}", entry.url, reason);
                }
                PageOutcome::Failed(message) => {
                    tracing::warn!("Error processing {}: {}", entry.url, message);
                }
            }
        }

        let pages_crawled: u32 = pages_per_domain.values().sum();
        tracing::info!(
            "Crawl completed: {} pages crawled, {} distinct emails in {:?}",
            pages_crawled,
            emails.len(),
            start_time.elapsed()
        );

        Ok(emails)
    }

    /// Processes one dequeued frontier entry through the gate sequence
    async fn visit(
        &self,
        entry: &FrontierEntry,
        maximum_depth: i32,
        visited: &mut HashSet<String>,
        pages_per_domain: &mut HashMap<String, u32>,
        emails: &mut HashSet<String>,
        frontier: &mut VecDeque<FrontierEntry>,
    ) -> PageOutcome {
        if visited.contains(&entry.url) {
            return PageOutcome::Skipped(SkipReason::AlreadyVisited);
        }

        // Depth-exceeded entries are dropped before being marked visited, so
        // the same URL can be re-enqueued via another parent and dropped
        // again.
        if maximum_depth >= 0 && entry.depth > maximum_depth {
            return PageOutcome::Skipped(SkipReason::DepthExceeded);
        }

        visited.insert(entry.url.clone());

        if self.policies.respect_robots_txt
            && !self
                .robots
                .is_allowed(&entry.url, &self.policies.user_agent)
                .await
        {
            return PageOutcome::Skipped(SkipReason::RobotsDisallowed);
        }

        let domain = page_domain(&entry.url);
        if !self.policies.unlimited_pages() {
            let crawled = pages_per_domain.get(&domain).copied().unwrap_or(0);
            if crawled >= self.policies.max_pages_per_domain as u32 {
                return PageOutcome::Skipped(SkipReason::QuotaExceeded);
            }
        }

        // The page consumes its quota slot even if the fetch or parse below
        // comes back empty.
        *pages_per_domain.entry(domain).or_insert(0) += 1;

        let body = match self.fetcher.fetch_page(&entry.url).await {
            Some(body) if !body.is_empty() => body,
            _ => return PageOutcome::Skipped(SkipReason::NoContent),
        };

        let hrefs = match self.parser.extract_hrefs(&body) {
            Ok(hrefs) => hrefs,
            Err(message) => return PageOutcome::Failed(message),
        };

        let follow_children = maximum_depth == -1 || entry.depth < maximum_depth;
        let mut new_emails = 0;
        let mut new_links = 0;

        for href in hrefs {
            if let Some(email) = self.extractor.from_mailto(&href) {
                if emails.insert(email) {
                    new_emails += 1;
                }
                continue;
            }

            if !follow_children || !is_crawlable_href(&href) {
                continue;
            }

            let Some(resolved) = resolve_href(&entry.url, &href) else {
                continue;
            };

            let normalized = normalize_url(&resolved);
            if !visited.contains(&normalized) {
                frontier.push_back(FrontierEntry {
                    url: normalized,
                    depth: entry.depth + 1,
                });
                new_links += 1;
            }
        }

        PageOutcome::Fetched {
            new_emails,
            new_links,
        }
    }
}
