// src/config.rs
//! Credentials and endpoints for the embedding API and the knowledge base.
//!
//! Values come from the process environment, with a local `.env` file loaded
//! first when present. The resulting config is handed to the client
//! constructors explicitly; nothing is kept in globals.

use crate::utils::AppError;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_KNOWLEDGE_TABLE: &str = "mentor_knowledge_base";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: SecretString,
    pub table: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub embedding: EmbeddingConfig,
    pub supabase: SupabaseConfig,
}

impl IngestConfig {
    /// Loads `.env` (if any) and reads the configuration from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found, using process environment"),
            Err(e) => tracing::warn!("Failed to read .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // First non-empty value among `keys`.
        let get = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };
        let require = |keys: &[&str]| {
            get(keys).ok_or_else(|| AppError::Config(format!("Missing environment variable {}", keys.join(" or "))))
        };

        let timeout_secs = match get(&["HTTP_TIMEOUT_SECS"]) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| AppError::Config(format!("Invalid HTTP_TIMEOUT_SECS '{}'", raw)))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        let timeout = Duration::from_secs(timeout_secs);

        let supabase_url = require(&["VITE_SUPABASE_URL", "SUPABASE_URL"])?;
        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(AppError::Config(format!("Supabase URL must be http(s): {}", supabase_url)));
        }

        Ok(Self {
            embedding: EmbeddingConfig {
                base_url: get(&["OPENROUTER_BASE_URL"])
                    .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                api_key: SecretString::new(require(&["VITE_OPENROUTER_API_KEY", "OPENROUTER_API_KEY"])?),
                model: get(&["EMBEDDING_MODEL"]).unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
                timeout,
            },
            supabase: SupabaseConfig {
                url: supabase_url.trim_end_matches('/').to_string(),
                service_key: SecretString::new(require(&["SUPABASE_SERVICE_ROLE_KEY"])?),
                table: get(&["KNOWLEDGE_TABLE"]).unwrap_or_else(|| DEFAULT_KNOWLEDGE_TABLE.to_string()),
                timeout,
            },
        })
    }
}
