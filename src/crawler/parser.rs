//! HTML parsing capability
//!
//! The crawl engine consumes parsing as an abstract capability that turns a
//! markup string into the hrefs of its anchor elements; the shipped
//! implementation is built on the `scraper` crate and tolerates malformed
//! markup.

use scraper::{Html, Selector};

/// The parse capability: all `<a href>` values of a document, in order
///
/// The error side exists for implementations that can reject input; it is
/// treated by the engine as a recoverable per-page failure.
pub trait LinkParser: Send + Sync {
    fn extract_hrefs(&self, html: &str) -> Result<Vec<String>, String>;
}

/// HTML parser backed by the scraper crate
///
/// Accepts well-formed and malformed markup alike; parsing never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperParser;

impl LinkParser for ScraperParser {
    fn extract_hrefs(&self, html: &str) -> Result<Vec<String>, String> {
        let document = Html::parse_document(html);

        let selector = Selector::parse("a[href]")
            .map_err(|e| format!("invalid anchor selector: {:?}", e))?;

        Ok(document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect())
    }
}
