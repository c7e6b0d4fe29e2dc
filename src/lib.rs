//! Lantern: a relevance-ranking web crawler
//!
//! This crate implements a bounded breadth-first crawl from a seed URL. Every
//! fetched page is scored against a free-text query using cosine similarity of
//! text embeddings, and the visited pages are returned ranked by relevance
//! together with extracted metadata (title, favicon URL).

pub mod config;
pub mod crawler;
pub mod embedding;
pub mod output;

use thiserror::Error;

/// Main error type for Lantern operations
#[derive(Debug, Error)]
pub enum LanternError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Embedding error: {0}")]
    Embed(#[from] EmbedError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Per-URL fetch failures
///
/// These never abort a crawl; the engine skips the offending URL and
/// continues with the rest of the frontier.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request for {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Embedding provider and scoring errors
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("Embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Malformed embedding response: {0}")]
    Malformed(String),

    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Result type alias for Lantern operations
pub type Result<T> = std::result::Result<T, LanternError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for embedding operations
pub type EmbedResult<T> = std::result::Result<T, EmbedError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlResult, PageRecord};
pub use embedding::{cosine, EmbedRole, EmbeddingClient};
pub use output::{ranked_links, RankedLink};
