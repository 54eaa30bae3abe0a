// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error {status}: {body}")]
    Http { status: reqwest::StatusCode, body: String },

    #[error("Embedding API rate limit exceeded")]
    RateLimited,

    #[error("Embedding response contained no vectors")]
    EmptyResponse,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body}")]
    Http { status: reqwest::StatusCode, body: String },

    #[error("Invalid service key: {0}")]
    InvalidKey(String),

    #[error("Insert returned no rows for '{0}'")]
    NotInserted(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Embedding request failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Knowledge base request failed: {0}")]
    Store(#[from] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
