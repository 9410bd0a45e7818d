use crate::config::types::{Config, CrawlPolicies};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_policies(&config.crawl)
}

/// Validates crawl policies
pub fn validate_policies(policies: &CrawlPolicies) -> Result<(), ConfigError> {
    if policies.request_timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_seconds must be >= 1, got {}",
            policies.request_timeout_seconds
        )));
    }

    if policies.max_pages_per_domain < -1 {
        return Err(ConfigError::Validation(format!(
            "max_pages_per_domain must be -1 (unbounded) or >= 0, got {}",
            policies.max_pages_per_domain
        )));
    }

    if policies.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
