use serde::Deserialize;

/// Main configuration structure for Mailsweep
///
/// A config file carries a single `[crawl]` table; any field left out falls
/// back to the Default preset value.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlPolicies,
}

/// Politeness policies applied to a crawl
///
/// This is an immutable value object: it is built once before a traversal and
/// never mutated during a run.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlPolicies {
    /// Minimum delay between two requests to the same domain (milliseconds)
    #[serde(rename = "delay-between-requests-ms", default = "default_delay")]
    pub delay_between_requests_ms: u64,

    /// Maximum number of pages to crawl per domain (-1 = unbounded)
    #[serde(rename = "max-pages-per-domain", default = "default_max_pages")]
    pub max_pages_per_domain: i32,

    /// Timeout for each HTTP request (seconds)
    #[serde(rename = "request-timeout-seconds", default = "default_timeout")]
    pub request_timeout_seconds: u64,

    /// User-Agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to honor robots.txt directives
    #[serde(rename = "respect-robots-txt", default = "default_respect_robots")]
    pub respect_robots_txt: bool,
}

fn default_delay() -> u64 {
    1000
}

fn default_max_pages() -> i32 {
    -1
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mailsweep/1.0 (+https://github.com/mailsweep/mailsweep)".to_string()
}

fn default_respect_robots() -> bool {
    true
}

impl Default for CrawlPolicies {
    /// Balanced defaults: 1 second between requests, no page cap, 30 second
    /// timeout, robots.txt respected.
    fn default() -> Self {
        Self {
            delay_between_requests_ms: default_delay(),
            max_pages_per_domain: default_max_pages(),
            request_timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            respect_robots_txt: default_respect_robots(),
        }
    }
}

impl CrawlPolicies {
    /// Conservative preset recommended for respectful crawling of third-party
    /// sites: 2 seconds between requests, at most 100 pages per domain.
    pub fn conservative() -> Self {
        Self {
            delay_between_requests_ms: 2000,
            max_pages_per_domain: 100,
            request_timeout_seconds: 20,
            user_agent: "Mailsweep/1.0 (Conservative; +https://github.com/mailsweep/mailsweep)"
                .to_string(),
            respect_robots_txt: true,
        }
    }

    /// Aggressive preset for tests or controlled environments: 100 ms between
    /// requests, no page cap, robots.txt ignored.
    pub fn aggressive() -> Self {
        Self {
            delay_between_requests_ms: 100,
            max_pages_per_domain: -1,
            request_timeout_seconds: 10,
            user_agent: "Mailsweep/1.0 (Fast; +https://github.com/mailsweep/mailsweep)".to_string(),
            respect_robots_txt: false,
        }
    }

    /// Returns true if the per-domain page quota is unbounded
    pub fn unlimited_pages(&self) -> bool {
        self.max_pages_per_domain < 0
    }
}
