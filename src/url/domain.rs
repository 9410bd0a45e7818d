use url::Url;

/// Extracts the quota/rate-limit bucket key for a URL
///
/// HTTP(S) URLs bucket by their lowercase host. Non-HTTP inputs (local
/// fixture paths) bucket by scheme, so sibling fixture pages share one
/// domain counter; completely unparseable input lands in a single
/// catch-all bucket.
///
/// # Examples
///
/// ```
/// use mailsweep::url::page_domain;
///
/// assert_eq!(page_domain("https://Example.COM/path"), "example.com");
/// assert_eq!(page_domain("C:/TestHtml/index.html"), "c");
/// ```
pub fn page_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_lowercase(),
            None => parsed.scheme().to_string(),
        },
        Err(_) => String::new(),
    }
}

/// Derives the `scheme://host` origin a robots.txt file is served from
///
/// Returns `None` for URLs without a host (local paths, unparseable input),
/// for which no robots.txt can exist.
pub fn robots_origin(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{}://{}", parsed.scheme(), host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_domain_simple() {
        assert_eq!(page_domain("https://example.com/path"), "example.com");
    }

    #[test]
    fn test_page_domain_lowercased() {
        assert_eq!(page_domain("https://EXAMPLE.COM/"), "example.com");
    }

    #[test]
    fn test_page_domain_subdomain() {
        assert_eq!(page_domain("https://blog.example.com/post"), "blog.example.com");
    }

    #[test]
    fn test_page_domain_with_port() {
        assert_eq!(page_domain("http://127.0.0.1:8080/"), "127.0.0.1");
    }

    #[test]
    fn test_page_domain_local_path() {
        // "C:" parses as a scheme; all pages on that drive share one bucket
        assert_eq!(page_domain("C:/TestHtml/index.html"), "c");
    }

    #[test]
    fn test_page_domain_unparseable() {
        assert_eq!(page_domain("not a url"), "");
    }

    #[test]
    fn test_robots_origin_http() {
        assert_eq!(
            robots_origin("https://example.com/deep/page?q=1"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_robots_origin_preserves_scheme() {
        assert_eq!(
            robots_origin("http://example.com/"),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn test_robots_origin_none_for_local_path() {
        assert_eq!(robots_origin("C:/TestHtml/index.html"), None);
    }

    #[test]
    fn test_robots_origin_none_for_garbage() {
        assert_eq!(robots_origin("///"), None);
    }
}
