//! HTTP fetcher implementation
//!
//! Defines the fetch capability consumed by the crawl engine and its
//! reqwest-backed implementation. Failures never cross this boundary: every
//! error condition collapses to `None` and is logged.

use crate::config::CrawlPolicies;
use crate::SweepError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// The fetch capability: retrieve a page body, or nothing
///
/// `None` covers every failure mode - non-success HTTP status, unsupported
/// content type, network error, timeout. Implementations must not panic or
/// return errors past this boundary.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Option<String>;
}

/// Real HTTP fetcher built on reqwest
///
/// The client is configured once from the crawl policies: identification
/// header, request timeout, and a redirect budget of 5 hops.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds an HTTP fetcher from the given policies
    pub fn new(policies: &CrawlPolicies) -> Result<Self, SweepError> {
        let client = Client::builder()
            .user_agent(policies.user_agent.clone())
            .timeout(Duration::from_secs(policies.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!("Request timeout for {}", url);
                } else if e.is_connect() {
                    tracing::warn!("Connection error for {}: {}", url, e);
                } else {
                    tracing::warn!("Network error for {}: {}", url, e);
                }
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("HTTP {} for {}", status.as_u16(), url);
            return None;
        }

        // Accept only HTML- or XML-like bodies. A missing Content-Type header
        // passes through (robots.txt responses frequently omit it).
        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            let lowered = content_type.to_lowercase();
            if !lowered.contains("html") && !lowered.contains("xml") {
                tracing::warn!("Unsupported content type for {}: {}", url, content_type);
                return None;
            }
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Failed to read body of {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_fetcher() {
        let policies = CrawlPolicies::default();
        assert!(HttpFetcher::new(&policies).is_ok());
    }

    #[test]
    fn test_build_with_presets() {
        assert!(HttpFetcher::new(&CrawlPolicies::conservative()).is_ok());
        assert!(HttpFetcher::new(&CrawlPolicies::aggressive()).is_ok());
    }

    // Fetch behavior against live servers is covered by the wiremock
    // integration tests.
}
