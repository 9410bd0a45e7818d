//! Per-domain rate limiting
//!
//! Wraps a fetch capability and enforces a minimum delay between two requests
//! to the same domain. Different domains never wait on each other; callers
//! hitting the same domain serialize on that domain's slot for the duration
//! of the wait.

use crate::crawler::PageFetcher;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use url::Url;

/// Last-request bookkeeping for one domain
#[derive(Debug, Default)]
struct DomainRateState {
    last_request_at: Option<Instant>,
}

/// A fetch capability gated by per-domain request spacing
///
/// The timestamp is updated immediately before the inner fetch is issued, so
/// the enforced gap is request-to-request spacing regardless of how long each
/// fetch takes. A `min_delay` of zero makes this a transparent passthrough
/// with no locking at all.
pub struct RateLimitedFetcher {
    inner: Arc<dyn PageFetcher>,
    min_delay: Duration,
    domains: Mutex<HashMap<String, Arc<tokio::sync::Mutex<DomainRateState>>>>,
}

impl RateLimitedFetcher {
    pub fn new(inner: Arc<dyn PageFetcher>, min_delay: Duration) -> Self {
        Self {
            inner,
            min_delay,
            domains: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the shared slot for a domain, creating it on first use
    ///
    /// The outer lock only guards the map itself, never a wait.
    fn domain_slot(&self, domain: &str) -> Arc<tokio::sync::Mutex<DomainRateState>> {
        let mut domains = self.domains.lock().unwrap();
        domains.entry(domain.to_string()).or_default().clone()
    }

    #[cfg(test)]
    fn tracked_domains(&self) -> usize {
        self.domains.lock().unwrap().len()
    }
}

/// Extracts the rate-limit bucket for a URL
///
/// URLs without a host (local fixture paths) are not limited, matching the
/// fact that there is no remote server to be polite to.
fn limit_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.to_lowercase())
}

#[async_trait]
impl PageFetcher for RateLimitedFetcher {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        if self.min_delay.is_zero() {
            return self.inner.fetch_page(url).await;
        }

        if let Some(domain) = limit_domain(url) {
            let slot = self.domain_slot(&domain);
            let mut state = slot.lock().await;

            if let Some(last) = state.last_request_at {
                let elapsed = last.elapsed();
                if elapsed < self.min_delay {
                    let wait = self.min_delay - elapsed;
                    tracing::debug!("Rate limiting: waiting {:?} for {}", wait, domain);
                    sleep(wait).await;
                }
            }

            state.last_request_at = Some(Instant::now());
        }

        self.inner.fetch_page(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Inner fetcher that counts how many times it was invoked
    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for CountingFetcher {
        async fn fetch_page(&self, _url: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some("<html></html>".to_string())
        }
    }

    #[test]
    fn test_limit_domain_extracts_host() {
        assert_eq!(
            limit_domain("https://Example.COM/page"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_limit_domain_none_for_local_path() {
        assert_eq!(limit_domain("C:/TestHtml/index.html"), None);
        assert_eq!(limit_domain("not a url"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_domain_requests_are_spaced() {
        let inner = Arc::new(CountingFetcher::default());
        let limiter = RateLimitedFetcher::new(inner.clone(), Duration::from_millis(500));

        let start = Instant::now();
        limiter.fetch_page("https://example.com/a").await;
        limiter.fetch_page("https://example.com/b").await;
        limiter.fetch_page("https://example.com/c").await;

        // Two enforced gaps of 500ms each
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_request_is_not_delayed() {
        let inner = Arc::new(CountingFetcher::default());
        let limiter = RateLimitedFetcher::new(inner, Duration::from_millis(500));

        let start = Instant::now();
        limiter.fetch_page("https://example.com/a").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_domains_do_not_block_each_other() {
        let inner = Arc::new(CountingFetcher::default());
        let limiter = RateLimitedFetcher::new(inner, Duration::from_millis(500));

        let start = Instant::now();
        limiter.fetch_page("https://a.example.com/1").await;
        limiter.fetch_page("https://b.example.com/1").await;
        limiter.fetch_page("https://c.example.com/1").await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_time_counts_toward_delay() {
        let inner = Arc::new(CountingFetcher::default());
        let limiter = RateLimitedFetcher::new(inner, Duration::from_millis(500));

        limiter.fetch_page("https://example.com/a").await;
        sleep(Duration::from_millis(300)).await;

        let start = Instant::now();
        limiter.fetch_page("https://example.com/b").await;

        // Only the remaining 200ms should be waited
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_delay_already_elapsed() {
        let inner = Arc::new(CountingFetcher::default());
        let limiter = RateLimitedFetcher::new(inner, Duration::from_millis(500));

        limiter.fetch_page("https://example.com/a").await;
        sleep(Duration::from_millis(600)).await;

        let start = Instant::now();
        limiter.fetch_page("https://example.com/b").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_zero_delay_is_passthrough() {
        let inner = Arc::new(CountingFetcher::default());
        let limiter = RateLimitedFetcher::new(inner.clone(), Duration::ZERO);

        limiter.fetch_page("https://example.com/a").await;
        limiter.fetch_page("https://example.com/b").await;

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        // No per-domain state is tracked at all
        assert_eq!(limiter.tracked_domains(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_paths_not_limited() {
        let inner = Arc::new(CountingFetcher::default());
        let limiter = RateLimitedFetcher::new(inner, Duration::from_millis(500));

        let start = Instant::now();
        limiter.fetch_page("C:/TestHtml/index.html").await;
        limiter.fetch_page("C:/TestHtml/child1.html").await;

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.tracked_domains(), 0);
    }
}
