//! Mailsweep: a polite email-discovery web crawler
//!
//! This crate implements a breadth-first crawler that collects contact emails
//! reachable from a seed page, respecting robots.txt, per-domain rate limits,
//! and per-domain page quotas.

pub mod config;
pub mod crawler;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Mailsweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed URL cannot be empty")]
    EmptySeed,

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Mailsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlPolicies;
pub use crawler::{crawl, EmailCrawler, HttpFetcher, LinkParser, PageFetcher, ScraperParser};
pub use robots::{RobotsCache, RobotsPolicy};
pub use url::{normalize_url, page_domain, resolve_href};
