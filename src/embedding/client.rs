//! Embedding provider client
//!
//! This module wraps the remote embedding API: a batch of texts goes in, one
//! fixed-length vector per text comes out. The client is constructed once from
//! configuration and injected wherever scoring is needed; there is no global
//! instance.

use crate::config::EmbeddingConfig;
use crate::EmbedError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for embedding requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Role hint for an embedding request
///
/// Embedding models distinguish between the corpus side and the query side of
/// a retrieval pair; the provider expects the distinction as an input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedRole {
    /// Text that is being indexed/scored (page contents)
    Document,
    /// Text that is searching (the user's query)
    Query,
}

impl EmbedRole {
    /// The provider's wire name for this role
    pub fn input_type(&self) -> &'static str {
        match self {
            EmbedRole::Document => "search_document",
            EmbedRole::Query => "search_query",
        }
    }
}

/// Request body for the embed endpoint
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    texts: &'a [String],
    model: &'a str,
    input_type: &'static str,
}

/// Response body from the embed endpoint
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Client for the remote embedding API
///
/// Failures are returned to the caller as [`EmbedError`]; the client itself
/// never retries. Callers decide how to degrade (see the page analyzer, which
/// treats any embedding failure as zero relevance).
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl EmbeddingClient {
    /// Creates a client from embedding configuration
    ///
    /// The API key is taken from the config's inline `api-key` when present,
    /// otherwise from the environment variable named by `api-key-env`.
    ///
    /// # Arguments
    ///
    /// * `config` - The embedding provider configuration
    ///
    /// # Returns
    ///
    /// * `Ok(EmbeddingClient)` - Ready-to-use client
    /// * `Err(EmbedError)` - No API key available or HTTP client build failure
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, EmbedError> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => std::env::var(&config.api_key_env)
                .map_err(|_| EmbedError::MissingApiKey(config.api_key_env.clone()))?,
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Embeds a batch of texts under the given role
    ///
    /// # Arguments
    ///
    /// * `texts` - The texts to embed
    /// * `role` - Whether the texts are documents or a query
    ///
    /// # Returns
    ///
    /// One vector per input text, in input order.
    pub async fn embed(
        &self,
        texts: &[String],
        role: EmbedRole,
    ) -> Result<Vec<Vec<f32>>, EmbedError> {
        tracing::debug!(
            "Embedding {} text(s) as {} with model {}",
            texts.len(),
            role.input_type(),
            self.model
        );

        let request = EmbedRequest {
            texts,
            model: &self.model,
            input_type: role.input_type(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbedError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbedError::Malformed(e.to_string()))?;

        if body.embeddings.len() != texts.len() {
            return Err(EmbedError::Malformed(format!(
                "expected {} embedding(s), got {}",
                texts.len(),
                body.embeddings.len()
            )));
        }

        tracing::trace!(
            "Received {} embedding(s) of dimension {}",
            body.embeddings.len(),
            body.embeddings.first().map(|v| v.len()).unwrap_or(0)
        );

        Ok(body.embeddings)
    }
}
