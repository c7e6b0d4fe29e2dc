//! Page analyzer: relevance scoring plus metadata extraction
//!
//! The analyzer combines the HTML parser with the embedding client: the page
//! body and the query are embedded, their cosine similarity becomes the page's
//! relevance score. Scoring is fail-soft: an embedding failure degrades the
//! page to zero relevance (with no link discovery) but never aborts the
//! analysis, so the title and favicon still come through.

use crate::crawler::parser::parse_page;
use crate::embedding::{cosine, EmbedRole, EmbeddingClient};
use crate::EmbedError;
use url::Url;

/// Result of analyzing one fetched page
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    /// Cosine similarity between the page text and the query (0.0 on failure)
    pub similarity: f32,

    /// The favicon URL, if one was found
    pub favicon: Option<String>,

    /// The page title, if present
    pub title: Option<String>,

    /// Discovered outbound links (empty when scoring failed)
    pub links: Vec<String>,
}

/// Analyzes fetched pages against a query
#[derive(Debug, Clone)]
pub struct PageAnalyzer {
    embedder: EmbeddingClient,
}

impl PageAnalyzer {
    /// Creates a new analyzer around an embedding client
    pub fn new(embedder: EmbeddingClient) -> Self {
        Self { embedder }
    }

    /// Analyzes a page's HTML against the query
    ///
    /// Never returns an error: embedding or scoring failures are absorbed by
    /// forcing the similarity to `0.0` and dropping the page's links, per the
    /// fail-soft policy. Metadata extraction is unaffected.
    ///
    /// # Arguments
    ///
    /// * `html` - The raw page HTML
    /// * `query` - The free-text search query
    /// * `base_url` - The page's own URL, used for link/favicon resolution
    pub async fn analyze(&self, html: &str, query: &str, base_url: &Url) -> PageAnalysis {
        let parsed = parse_page(html, base_url);

        match self.score(&parsed.body_text, query).await {
            Ok(similarity) => PageAnalysis {
                similarity,
                favicon: parsed.favicon,
                title: parsed.title,
                links: parsed.links,
            },
            Err(e) => {
                tracing::warn!("Scoring failed for {}: {}", base_url, e);
                PageAnalysis {
                    similarity: 0.0,
                    favicon: parsed.favicon,
                    title: parsed.title,
                    links: Vec::new(),
                }
            }
        }
    }

    /// Embeds the page text and the query, then computes their similarity
    async fn score(&self, page_text: &str, query: &str) -> Result<f32, EmbedError> {
        let document_vectors = self
            .embedder
            .embed(&[page_text.to_string()], EmbedRole::Document)
            .await?;
        let query_vectors = self
            .embedder
            .embed(&[query.to_string()], EmbedRole::Query)
            .await?;

        let document = document_vectors
            .first()
            .ok_or_else(|| EmbedError::Malformed("empty document embedding batch".to_string()))?;
        let query_vec = query_vectors
            .first()
            .ok_or_else(|| EmbedError::Malformed("empty query embedding batch".to_string()))?;

        cosine(document, query_vec)
    }
}
