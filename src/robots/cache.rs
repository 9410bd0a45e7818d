//! Robots.txt caching implementation
//!
//! Fetches and memoizes one [`RobotsPolicy`] per `scheme://host` origin, with
//! automatic expiration after a time-to-live (24 hours by default).

use crate::crawler::PageFetcher;
use crate::robots::RobotsPolicy;
use crate::url::robots_origin;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A cached robots.txt policy for one origin
#[derive(Debug, Clone)]
struct CachedPolicy {
    policy: Arc<RobotsPolicy>,

    /// When the robots.txt was fetched
    fetched_at: DateTime<Utc>,
}

impl CachedPolicy {
    fn is_fresh(&self, ttl: Duration) -> bool {
        Utc::now() - self.fetched_at < ttl
    }
}

/// Per-domain robots.txt cache
///
/// The cache map sits behind a single async mutex: concurrent callers for the
/// same origin serialize on it, so one robots.txt is never fetched twice in a
/// race. Fetch failures and empty bodies are cached as an all-allow policy
/// rather than surfaced as errors.
pub struct RobotsCache {
    fetcher: Arc<dyn PageFetcher>,
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedPolicy>>,
}

impl RobotsCache {
    /// Creates a cache with the default 24 hour time-to-live
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_ttl(fetcher, Duration::hours(24))
    }

    /// Creates a cache with a custom time-to-live
    pub fn with_ttl(fetcher: Arc<dyn PageFetcher>, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the robots.txt policy governing the given URL
    ///
    /// A cached, non-expired policy is returned as-is; otherwise
    /// `<origin>/robots.txt` is fetched through the injected fetch capability
    /// and the parsed result is stored with the current timestamp. URLs with
    /// no derivable origin (local paths) get a permissive policy.
    pub async fn policy_for(&self, url: &str) -> Arc<RobotsPolicy> {
        let Some(origin) = robots_origin(url) else {
            return Arc::new(RobotsPolicy::allow_all());
        };

        let mut entries = self.entries.lock().await;

        if let Some(cached) = entries.get(&origin) {
            if cached.is_fresh(self.ttl) {
                return cached.policy.clone();
            }
        }

        let robots_url = format!("{}/robots.txt", origin);
        tracing::debug!("Fetching robots.txt for {}", origin);

        let policy = match self.fetcher.fetch_page(&robots_url).await {
            Some(body) if !body.is_empty() => RobotsPolicy::parse(&body),
            _ => {
                tracing::debug!("No robots.txt for {}, allowing all", origin);
                RobotsPolicy::allow_all()
            }
        };

        let policy = Arc::new(policy);
        entries.insert(
            origin,
            CachedPolicy {
                policy: policy.clone(),
                fetched_at: Utc::now(),
            },
        );

        policy
    }

    /// Checks whether a URL may be crawled by the given user agent
    ///
    /// Convenience composition of [`Self::policy_for`] and
    /// [`RobotsPolicy::is_allowed`]; any internal failure defaults to allowed.
    pub async fn is_allowed(&self, url: &str, agent: &str) -> bool {
        self.policy_for(url).await.is_allowed(url, agent)
    }

    /// Removes all cache entries older than the time-to-live
    pub async fn evict_expired(&self) {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, cached| cached.is_fresh(self.ttl));
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} expired robots.txt entries", evicted);
        }
    }

    /// Number of origins currently cached
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns true if no origin is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
