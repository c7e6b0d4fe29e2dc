//! Output assembly for crawl results
//!
//! The core keeps title and favicon as `Option`s; this module is the only
//! place they are converted to the response's sentinel strings. The serialized
//! row shape is `{url, icoSrc, ptitle}`, most relevant first, with the raw
//! similarity score intentionally left out: callers see rank, not score.

use crate::crawler::CrawlResult;
use serde::Serialize;

/// Sentinel favicon value when no icon link was found
const NO_FAVICON: &str = "blank";

/// Sentinel title value when the page had no usable <title>
const NO_TITLE: &str = "No title found";

/// One row of the ranked response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedLink {
    /// The page URL
    pub url: String,

    /// Favicon URL, or "blank" when none was found
    #[serde(rename = "icoSrc")]
    pub ico_src: String,

    /// Page title, or "No title found" when absent
    pub ptitle: String,
}

/// Converts a crawl result into serializable ranked rows
///
/// The input is already sorted most-relevant-first; this only applies the
/// sentinel conversion.
pub fn ranked_links(result: &CrawlResult) -> Vec<RankedLink> {
    result
        .pages
        .iter()
        .map(|record| RankedLink {
            url: record.url.clone(),
            ico_src: record
                .favicon
                .clone()
                .unwrap_or_else(|| NO_FAVICON.to_string()),
            ptitle: record.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
        })
        .collect()
}
