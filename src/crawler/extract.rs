//! Email extraction from mailto links

use regex::Regex;

/// Validation pattern applied to every candidate address
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// Extracts and validates email addresses from `mailto:` hrefs
pub struct EmailExtractor {
    pattern: Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
        }
    }

    /// Pulls a validated, lower-cased email out of a mailto href
    ///
    /// The `mailto:` prefix is matched case-insensitively; a query suffix
    /// (`?subject=...`) is cut off before validation. Returns `None` for
    /// non-mailto hrefs and for addresses that fail validation - the latter
    /// are discarded silently.
    pub fn from_mailto(&self, href: &str) -> Option<String> {
        let href = href.trim();

        let prefix = href.get(..7)?;
        if !prefix.eq_ignore_ascii_case("mailto:") {
            return None;
        }

        let mut email = &href[7..];
        if let Some(index) = email.find('?') {
            if index > 0 {
                email = &email[..index];
            }
        }

        if self.pattern.is_match(email) {
            Some(email.to_lowercase())
        } else {
            None
        }
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}
