//! Configuration module for Mailsweep
//!
//! This module defines the crawl politeness policies and handles loading,
//! parsing, and validating TOML configuration files.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlPolicies};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation for callers building policies programmatically
pub use validation::validate_policies;
