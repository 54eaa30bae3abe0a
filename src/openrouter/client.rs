// src/openrouter/client.rs
use crate::config::EmbeddingConfig;
use crate::ingest::Embedder;
use crate::openrouter::models::{EmbeddingRequest, EmbeddingResponse};
use crate::utils::error::EmbeddingError;
use async_trait::async_trait;
use reqwest::header;
use secrecy::{ExposeSecret, SecretString};

/// Embedding client for OpenRouter (or any OpenAI-compatible endpoint).
pub struct OpenRouterEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: SecretString,
}

impl OpenRouterEmbedder {
    /// Creates a reqwest client configured from `config`.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: embeddings_url(&config.base_url),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

/// `{base_url}/embeddings`
pub fn embeddings_url(base_url: &str) -> String {
    format!("{}/embeddings", base_url.trim_end_matches('/'))
}

#[async_trait]
impl Embedder for OpenRouterEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        tracing::debug!("Requesting {} embedding for {} chars", self.model, text.chars().count());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .header(header::ACCEPT, "application/json")
            .json(&EmbeddingRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await?; // Propagates reqwest::Error as EmbeddingError::Network

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                tracing::warn!("Received 429 Too Many Requests from {}", self.endpoint);
                return Err(EmbeddingError::RateLimited);
            }
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Embedding API returned HTTP {}: {}", status, body);
            return Err(EmbeddingError::Http { status, body });
        }

        let parsed: EmbeddingResponse = response.json().await?;
        parsed.into_first().ok_or(EmbeddingError::EmptyResponse)
    }
}
