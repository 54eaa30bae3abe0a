// src/openrouter/models.rs
use serde::{Deserialize, Serialize};

/// Body of `POST /embeddings` (OpenAI-compatible).
#[derive(Debug, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
}

/// Response of `POST /embeddings`; only the vectors are read.
#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingData {
    pub embedding: Vec<f32>,
}

impl EmbeddingResponse {
    /// The first vector, which belongs to the single input we send.
    pub fn into_first(self) -> Option<Vec<f32>> {
        self.data.into_iter().next().map(|d| d.embedding)
    }
}
