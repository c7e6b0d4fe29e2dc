//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed inter-request delay
//! - HTML parsing: title, favicon, body text, link extraction
//! - Relevance scoring of pages against the query
//! - The budget-bounded breadth-first crawl loop

mod analyzer;
mod engine;
mod fetcher;
mod parser;

pub use analyzer::{PageAnalysis, PageAnalyzer};
pub use engine::{CrawlEngine, CrawlResult, PageRecord};
pub use fetcher::{build_http_client, PageFetcher};
pub use parser::{parse_page, ParsedPage};

use crate::config::Config;
use crate::embedding::EmbeddingClient;
use crate::LanternError;
use std::time::Duration;

/// Builds a ready-to-run crawl engine from configuration
///
/// Wires the HTTP client, the page fetcher, and the page analyzer together
/// the way the CLI does. Library callers that want to substitute pieces can
/// construct [`CrawlEngine`] directly.
///
/// # Arguments
///
/// * `config` - The loaded configuration
/// * `embedder` - The embedding client used for relevance scoring
///
/// # Returns
///
/// * `Ok(CrawlEngine)` - Ready-to-run engine
/// * `Err(LanternError)` - HTTP client construction failed
pub fn build_engine(config: &Config, embedder: EmbeddingClient) -> Result<CrawlEngine, LanternError> {
    let client = build_http_client(&config.user_agent)?;
    let fetcher = PageFetcher::new(
        client,
        Duration::from_millis(config.crawler.request_delay_ms),
    );
    let analyzer = PageAnalyzer::new(embedder);
    Ok(CrawlEngine::new(fetcher, analyzer))
}
