use serde::Deserialize;

/// Main configuration structure for Lantern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Delay after every fetch attempt, success or failure (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Upper bound on the per-run page budget
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Embedding provider configuration
///
/// The API key itself is read from the environment (see `api_key_env`) unless
/// an inline `api-key` is supplied, which is mainly useful in tests.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Embed endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Embedding model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the provider API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Inline API key, overrides the environment variable when set
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            api_key: None,
        }
    }
}

fn default_request_delay_ms() -> u64 {
    500
}

fn default_max_pages() -> usize {
    50
}

fn default_endpoint() -> String {
    "https://api.cohere.ai/v1/embed".to_string()
}

fn default_model() -> String {
    "embed-english-v3.0".to_string()
}

fn default_api_key_env() -> String {
    "CO_API_KEY".to_string()
}
