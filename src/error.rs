//! Error types for movie-rag
//!
//! Errors from vector bookkeeping, the hosted model providers and configuration
//! all funnel into [`RagError`].

use thiserror::Error;

/// Main error type for retrieval and generation
#[derive(Error, Debug)]
pub enum RagError {
    /// Query or record vector length differs from the collection dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Embedding or chat completion call failed (network, auth, rate limit, empty reply)
    #[error("Retrieval/generation failed: {0}")]
    Provider(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for movie-rag operations
pub type Result<T> = std::result::Result<T, RagError>;

impl From<async_openai::error::OpenAIError> for RagError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        RagError::Provider(err.to_string())
    }
}
