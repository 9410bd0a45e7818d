use url::Url;

/// Href prefixes that are never crawlable child links
///
/// mailto: is handled separately by the email extractor; the rest point at
/// things a fetch cannot retrieve.
const NON_CRAWLABLE_PREFIXES: &[&str] = &["mailto:", "javascript:", "tel:", "ftp:"];

/// Returns true if an href may be followed as a child page link
///
/// Fragment-only anchors and the schemes in [`NON_CRAWLABLE_PREFIXES`] are
/// rejected; the check is ASCII case-insensitive.
pub fn is_crawlable_href(href: &str) -> bool {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lowered = href.to_ascii_lowercase();
    !NON_CRAWLABLE_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Resolves an href against the URL of the page it was found on
///
/// * An href that is already a well-formed absolute URL is returned unchanged.
/// * An HTTP/HTTPS base resolves the href with standard base/relative URL
///   composition.
/// * A local-path base resolves the href against its containing directory.
///
/// Returns `None` when resolution fails or the combination is invalid; the
/// failure is logged, never raised.
pub fn resolve_href(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    // Already absolute: leave untouched
    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }

    match Url::parse(base) {
        Ok(base_url) if base_url.scheme() == "http" || base_url.scheme() == "https" => {
            match base_url.join(href) {
                Ok(resolved) => Some(resolved.to_string()),
                Err(e) => {
                    tracing::debug!("Failed to resolve {} against {}: {}", href, base, e);
                    None
                }
            }
        }
        _ => resolve_local(base, href),
    }
}

/// Resolves an href against the directory of a local-path base
///
/// Mirrors filesystem semantics without touching the real filesystem, so
/// Windows-style fixture paths behave the same on every platform.
fn resolve_local(base: &str, href: &str) -> Option<String> {
    let base = base.replace('\\', "/");
    let directory = match base.rfind('/') {
        Some(index) => &base[..index],
        None => {
            tracing::debug!("Base {} has no containing directory for {}", base, href);
            return None;
        }
    };

    let relative = href.strip_prefix("./").unwrap_or(href);
    Some(format!("{}/{}", directory, relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_href_unchanged() {
        assert_eq!(
            resolve_href("https://example.com/page", "https://other.com/x"),
            Some("https://other.com/x".to_string())
        );
    }

    #[test]
    fn test_relative_against_http_base() {
        assert_eq!(
            resolve_href("https://example.com/dir/page.html", "other.html"),
            Some("https://example.com/dir/other.html".to_string())
        );
    }

    #[test]
    fn test_root_relative_against_http_base() {
        assert_eq!(
            resolve_href("https://example.com/dir/page.html", "/contact"),
            Some("https://example.com/contact".to_string())
        );
    }

    #[test]
    fn test_dot_segments_against_http_base() {
        assert_eq!(
            resolve_href("https://example.com/a/b/page.html", "../up.html"),
            Some("https://example.com/a/up.html".to_string())
        );
    }

    #[test]
    fn test_relative_against_local_base() {
        assert_eq!(
            resolve_href("C:/TestHtml/index.html", "./child1.html"),
            Some("C:/TestHtml/child1.html".to_string())
        );
    }

    #[test]
    fn test_relative_against_local_base_without_dot() {
        assert_eq!(
            resolve_href("C:/TestHtml/index.html", "child2.html"),
            Some("C:/TestHtml/child2.html".to_string())
        );
    }

    #[test]
    fn test_backslash_local_base() {
        assert_eq!(
            resolve_href(r"C:\TestHtml\index.html", "./child1.html"),
            Some("C:/TestHtml/child1.html".to_string())
        );
    }

    #[test]
    fn test_local_base_without_directory() {
        assert_eq!(resolve_href("orphan.html", "./child.html"), None);
    }

    #[test]
    fn test_empty_href() {
        assert_eq!(resolve_href("https://example.com/", ""), None);
    }

    #[test]
    fn test_crawlable_plain_links() {
        assert!(is_crawlable_href("/page"));
        assert!(is_crawlable_href("./child1.html"));
        assert!(is_crawlable_href("https://example.com/page"));
    }

    #[test]
    fn test_non_crawlable_mailto() {
        assert!(!is_crawlable_href("mailto:test@example.com"));
        assert!(!is_crawlable_href("MAILTO:test@example.com"));
    }

    #[test]
    fn test_non_crawlable_javascript() {
        assert!(!is_crawlable_href("javascript:void(0)"));
    }

    #[test]
    fn test_non_crawlable_tel() {
        assert!(!is_crawlable_href("tel:+1234567890"));
    }

    #[test]
    fn test_non_crawlable_ftp() {
        assert!(!is_crawlable_href("ftp://example.com/file"));
    }

    #[test]
    fn test_non_crawlable_fragment() {
        assert!(!is_crawlable_href("#section"));
    }

    #[test]
    fn test_non_crawlable_empty() {
        assert!(!is_crawlable_href("   "));
    }
}
