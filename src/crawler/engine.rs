//! Crawl engine - the core crawl-and-rank state machine
//!
//! The engine owns the frontier (FIFO queue), the visited set, and the page
//! budget for one run. URLs are processed strictly sequentially: pop, fetch,
//! analyze, record, enqueue discovered links. Per-URL failures are isolated
//! and skipped; nothing short of argument errors aborts a run. The final
//! result is the processed pages sorted by relevance, most relevant first.

use crate::crawler::analyzer::PageAnalyzer;
use crate::crawler::fetcher::PageFetcher;
use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// One successfully processed page
///
/// Created once per fetched-and-analyzed URL and immutable afterwards. Title
/// and favicon stay optional here; sentinel strings belong to the output
/// boundary only.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// The page URL as it was crawled
    pub url: String,

    /// Cosine similarity against the query (0.0 when scoring failed)
    pub similarity: f32,

    /// The favicon URL, if one was found
    pub favicon: Option<String>,

    /// The page title, if present
    pub title: Option<String>,
}

/// The outcome of one crawl run: pages ranked most-relevant first
///
/// Ties keep their processing order (the sort is stable).
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    pub pages: Vec<PageRecord>,
}

impl CrawlResult {
    /// Number of pages processed during the run
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the run produced no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// The crawl orchestrator
///
/// Holds the per-page collaborators; all per-run state (frontier, visited
/// set, budget counter, results) lives inside [`CrawlEngine::run`] and is
/// discarded when the run ends.
pub struct CrawlEngine {
    fetcher: PageFetcher,
    analyzer: PageAnalyzer,
}

impl CrawlEngine {
    /// Creates a new engine from its collaborators
    pub fn new(fetcher: PageFetcher, analyzer: PageAnalyzer) -> Self {
        Self { fetcher, analyzer }
    }

    /// Runs a bounded breadth-first crawl from `seed`, ranking pages against
    /// `query`
    ///
    /// The crawl terminates when the frontier is empty or `budget` pages have
    /// been successfully processed, whichever comes first. A failed fetch does
    /// not count against the budget and ends that branch of the link graph.
    ///
    /// # Arguments
    ///
    /// * `seed` - The starting URL
    /// * `query` - Free-text query the pages are scored against
    /// * `budget` - Maximum number of successfully processed pages
    pub async fn run(&self, seed: &str, query: &str, budget: usize) -> CrawlResult {
        let mut frontier: VecDeque<String> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut records: Vec<PageRecord> = Vec::new();
        let mut processed = 0usize;

        // Invariant: a URL enters the visited set at the same step it enters
        // the frontier, before it is ever fetched
        frontier.push_back(seed.to_string());
        visited.insert(seed.to_string());

        tracing::info!("Starting crawl from {} with budget {}", seed, budget);
        let start_time = std::time::Instant::now();

        while processed < budget {
            let url = match frontier.pop_front() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier is empty, crawl exhausted");
                    break;
                }
            };

            tracing::debug!("Processing URL: {}", url);

            // The page's own URL doubles as the base for relative resolution
            let base_url = match Url::parse(&url) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Skipping unparseable URL {}: {}", url, e);
                    continue;
                }
            };

            let html = match self.fetcher.fetch(&url).await {
                Ok(body) => body,
                Err(e) => {
                    // Dead end: not counted, links never discovered
                    tracing::warn!("Failed to fetch {}: {}", url, e);
                    continue;
                }
            };

            let analysis = self.analyzer.analyze(&html, query, &base_url).await;

            records.push(PageRecord {
                url: url.clone(),
                similarity: analysis.similarity,
                favicon: analysis.favicon,
                title: analysis.title,
            });
            processed += 1;

            tracing::debug!(
                "Processed {} ({}/{}), similarity {:.4}, {} link(s) discovered",
                url,
                processed,
                budget,
                analysis.similarity,
                analysis.links.len()
            );

            // The budget check here only avoids frontier bloat near the edge;
            // the loop condition above is the authoritative gate
            for link in analysis.links {
                if processed >= budget {
                    break;
                }
                if !visited.contains(&link) {
                    visited.insert(link.clone());
                    frontier.push_back(link);
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} page(s) processed in {:?}, {} URL(s) left in frontier",
            processed,
            start_time.elapsed(),
            frontier.len()
        );

        // Stable sort keeps processing order for equal scores. Similarities
        // are never NaN (the scorer maps zero norms to 0.0), so ties on
        // incomparable values cannot reorder anything meaningful.
        records.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });

        CrawlResult { pages: records }
    }
}
