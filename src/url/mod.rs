//! URL handling module for Mailsweep
//!
//! This module provides URL normalization, base/relative resolution, link
//! classification, and domain extraction.

mod domain;
mod normalize;
mod resolve;

// Re-export main functions
pub use domain::{page_domain, robots_origin};
pub use normalize::normalize_url;
pub use resolve::{is_crawlable_href, resolve_href};
