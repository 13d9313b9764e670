//! Embedding and similarity search for movie-rag
//!
//! Vector generation is delegated to an [`EmbeddingProvider`]; ranking is an
//! exact cosine scan over an in-memory collection.

pub mod embedding;
pub mod search;

// Re-export main types and functions
pub use embedding::{Embedding, EmbeddingProvider, OpenAiEmbeddings};
pub use search::{SearchResult, cosine_similarity, dot_product, l2_norm, search};
