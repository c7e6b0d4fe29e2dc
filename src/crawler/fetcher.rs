//! HTTP fetcher implementation
//!
//! This module performs the per-URL page retrieval:
//! - Building an HTTP client with a proper user agent string
//! - One GET request per URL, non-2xx treated as failure
//! - Lossy UTF-8 decoding of the response body
//! - A fixed post-request delay as a crude rate limit

use crate::config::UserAgentConfig;
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use lantern::config::UserAgentConfig;
/// use lantern::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "lantern".to_string(),
///     crawler_version: "0.1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages one at a time with a fixed inter-request delay
///
/// The delay is awaited after every attempt, success or failure, before the
/// result is returned, so consecutive requests are always spaced apart.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    delay: Duration,
}

impl PageFetcher {
    /// Creates a new fetcher
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to use (see [`build_http_client`])
    /// * `delay` - Delay applied after every fetch attempt
    pub fn new(client: Client, delay: Duration) -> Self {
        Self { client, delay }
    }

    /// Fetches a URL and returns its body as text
    ///
    /// Non-2xx statuses are failures: the caller treats any [`FetchError`] as
    /// "skip this URL", never as fatal. Invalid byte sequences in the body are
    /// replaced rather than rejected.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The decoded page body
    /// * `Err(FetchError)` - Transport failure or HTTP error status
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let result = self.fetch_inner(url).await;

        // Rate limit: pause after the attempt regardless of outcome
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        result
    }

    async fn fetch_inner(&self, url: &str) -> Result<String, FetchError> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.to_string(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
