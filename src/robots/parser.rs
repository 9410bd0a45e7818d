//! Robots.txt parser implementation
//!
//! Parses robots.txt text into per-agent allow/disallow rule groups, a
//! crawl-delay, and a sitemap list, and answers path permission queries.

use regex::Regex;
use std::collections::HashMap;
use url::Url;

/// Rule polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Allow,
    Disallow,
}

/// A single allow/disallow rule with its path pattern
///
/// The pattern grammar supports `*` as "any sequence" and a `$` anchor for
/// end-of-path. A pattern of exactly `/` or an empty pattern matches
/// unconditionally.
#[derive(Debug, Clone)]
pub struct RobotRule {
    pub kind: RuleKind,
    pub pattern: String,
    matcher: Option<Regex>,
}

impl RobotRule {
    fn new(kind: RuleKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: pattern.to_string(),
            matcher: compile_pattern(pattern),
        }
    }

    /// Returns true if this rule applies to the given path+query
    fn matches(&self, path: &str) -> bool {
        match &self.matcher {
            Some(regex) => regex.is_match(path),
            None => true,
        }
    }
}

/// Translates a robots.txt path pattern into an anchored regex
///
/// Returns None for unconditional patterns (`/` or empty).
fn compile_pattern(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() || pattern == "/" {
        return None;
    }

    let translated = format!(
        "(?i)^{}",
        regex::escape(pattern)
            .replace(r"\*", ".*")
            .replace(r"\$", "$")
    );

    match Regex::new(&translated) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!("Unusable robots.txt pattern '{}': {}", pattern, e);
            None
        }
    }
}

/// Parsed robots.txt policy for one domain
///
/// Built once per robots.txt body and immutable thereafter. An empty policy
/// (no rules) allows everything, which is also the substitute used when a
/// robots.txt cannot be fetched.
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    rules: HashMap<String, Vec<RobotRule>>,
    crawl_delay_ms: Option<u64>,
    sitemaps: Vec<String>,
}

impl RobotsPolicy {
    /// Creates a permissive policy that allows everything
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parses a robots.txt body
    ///
    /// Lines are trimmed; blank lines and `#` comments (including inline
    /// suffixes) are skipped. Each remaining line splits into
    /// `directive: value` on the first colon. `user-agent` opens a new rule
    /// group; `allow`/`disallow` append to the current group; `crawl-delay`
    /// is stored in milliseconds (last occurrence wins); `sitemap` values
    /// accumulate in order. Unrecognized directives are ignored.
    pub fn parse(content: &str) -> Self {
        let mut policy = Self::default();

        // Rules before any user-agent line belong to the wildcard group
        let mut current_agent = "*".to_string();
        let mut current_rules: Vec<RobotRule> = Vec::new();

        for line in content.lines() {
            let mut trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            // Strip an inline comment suffix
            if let Some(index) = trimmed.find('#') {
                trimmed = trimmed[..index].trim_end();
            }

            let Some((directive, value)) = trimmed.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    // Flush the previous group's accumulated rules
                    if !current_rules.is_empty() {
                        policy
                            .rules
                            .entry(current_agent)
                            .or_default()
                            .append(&mut current_rules);
                    }
                    current_agent = value.to_lowercase();
                    current_rules = Vec::new();
                }
                "disallow" => {
                    current_rules.push(RobotRule::new(RuleKind::Disallow, value));
                }
                "allow" => {
                    current_rules.push(RobotRule::new(RuleKind::Allow, value));
                }
                "crawl-delay" => {
                    if let Ok(seconds) = value.parse::<u64>() {
                        policy.crawl_delay_ms = Some(seconds * 1000);
                    }
                }
                "sitemap" => {
                    policy.sitemaps.push(value.to_string());
                }
                _ => {}
            }
        }

        // Flush the final group
        if !current_rules.is_empty() {
            policy
                .rules
                .entry(current_agent)
                .or_default()
                .append(&mut current_rules);
        }

        policy
    }

    /// Checks whether a URL may be crawled by the given user agent
    ///
    /// Rule groups whose key is contained in the lower-cased agent string take
    /// precedence; the `*` group applies only when no specific group matches.
    /// Among applicable rules, the matching rule with the longest pattern
    /// wins. If no group or no rule matches, the path is allowed, and any
    /// internal error (malformed URL) also defaults to allowed.
    pub fn is_allowed(&self, url: &str, agent: &str) -> bool {
        if url.is_empty() {
            return false;
        }

        let path = match Url::parse(url) {
            Ok(parsed) => {
                let mut path = parsed.path().to_string();
                if let Some(query) = parsed.query() {
                    path.push('?');
                    path.push_str(query);
                }
                path
            }
            Err(_) => return true,
        };

        let applicable = self.applicable_rules(agent);
        if applicable.is_empty() {
            return true;
        }

        // Longest-pattern specificity: among matching rules, the one with the
        // longest pattern string decides. Ties keep the earliest rule.
        let mut matching: Option<&RobotRule> = None;
        for rule in applicable {
            if rule.matches(&path)
                && matching.map_or(true, |m| rule.pattern.len() > m.pattern.len())
            {
                matching = Some(rule);
            }
        }

        match matching {
            Some(rule) => rule.kind == RuleKind::Allow,
            None => true,
        }
    }

    /// Returns the crawl delay in milliseconds, if one was specified
    pub fn crawl_delay_ms(&self) -> Option<u64> {
        self.crawl_delay_ms
    }

    /// Returns the sitemap URLs in declaration order
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Resolves the rule groups applicable to an agent
    ///
    /// Specific groups override the wildcard group rather than merging with
    /// it.
    fn applicable_rules(&self, agent: &str) -> Vec<&RobotRule> {
        let normalized_agent = agent.to_lowercase();

        let specific: Vec<&RobotRule> = self
            .rules
            .iter()
            .filter(|(key, _)| key.as_str() != "*" && normalized_agent.contains(key.as_str()))
            .flat_map(|(_, rules)| rules.iter())
            .collect();

        if !specific.is_empty() {
            return specific;
        }

        self.rules
            .get("*")
            .map(|rules| rules.iter().collect())
            .unwrap_or_default()
    }
}
