// src/supabase/client.rs
use crate::config::SupabaseConfig;
use crate::ingest::KnowledgeStore;
use crate::supabase::models::{KnowledgeRecord, RowId};
use crate::utils::error::StoreError;
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;

/// PostgREST client for the knowledge-base table.
pub struct SupabaseStore {
    client: reqwest::Client,
    table_url: String,
}

impl SupabaseStore {
    /// Builds the HTTP client with the service-role key baked into default headers.
    pub fn new(config: &SupabaseConfig) -> Result<Self, StoreError> {
        let key = config.service_key.expose_secret();
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(key).map_err(|_| invalid_key())?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|_| invalid_key())?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            table_url: table_url(&config.url, &config.table),
        })
    }
}

fn invalid_key() -> StoreError {
    StoreError::InvalidKey("contains characters not allowed in an HTTP header".to_string())
}

/// `{url}/rest/v1/{table}`
pub fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

/// Turns a non-2xx response into `StoreError::Http`, keeping the body for the log.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!("Knowledge base returned HTTP {}: {}", status, body);
    Err(StoreError::Http { status, body })
}

#[async_trait]
impl KnowledgeStore for SupabaseStore {
    async fn exists(&self, book_title: &str, chunk_name: &str) -> Result<bool, StoreError> {
        let response = self
            .client
            .get(&self.table_url)
            .query(&[
                ("select", "id".to_string()),
                ("book_title", format!("eq.{}", book_title)),
                ("chunk_name", format!("eq.{}", chunk_name)),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<RowId> = ensure_success(response).await?.json().await?;
        Ok(!rows.is_empty())
    }

    async fn insert(&self, record: &KnowledgeRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        // With return=representation PostgREST echoes the inserted rows.
        let rows: Vec<serde_json::Value> = ensure_success(response).await?.json().await?;
        if rows.is_empty() {
            return Err(StoreError::NotInserted(record.chunk_name.clone()));
        }
        tracing::debug!("Inserted '{}' into {}", record.chunk_name, self.table_url);
        Ok(())
    }
}
