use url::Url;

/// Normalizes a URL so the visited set and caches agree on one spelling
///
/// # Normalization Steps
///
/// For absolute HTTP/HTTPS URLs:
///
/// 1. Lowercase the scheme and host
/// 2. Remove the fragment (everything after #)
/// 3. Remove a default port (80 for HTTP, 443 for HTTPS)
/// 4. Leave path and query untouched
///
/// Non-HTTP inputs (filesystem-style fixture paths, unknown schemes) only get
/// their separator characters normalized. This function never fails: on any
/// parse error it falls back to separator normalization of the original
/// string.
///
/// # Examples
///
/// ```
/// use mailsweep::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("HTTP://EXAMPLE.COM:80/Page?q=1#top"),
///     "http://example.com/Page?q=1"
/// );
/// assert_eq!(
///     normalize_url(r"C:\TestHtml\index.html"),
///     "C:/TestHtml/index.html"
/// );
/// ```
pub fn normalize_url(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(mut url) if url.scheme() == "http" || url.scheme() == "https" => {
            // The parser already lowercases scheme and host and drops a
            // default port; the fragment is the one piece left to strip.
            url.set_fragment(None);
            url.to_string()
        }
        _ => normalize_separators(url_str),
    }
}

/// Normalizes path separators in a non-URL string
fn normalize_separators(input: &str) -> String {
    input.replace('\\', "/")
}
