//! In-memory vector storage for movie-rag
//!
//! Records live in an insertion-ordered [`Collection`] owned by the retrieval
//! pipeline.
//! Nothing is persisted; everything is dropped at process end.

pub mod collection;
pub mod schema;

// Re-export main types
pub use collection::Collection;
pub use schema::{DEFAULT_DIMENSION, MOVIE_COLLECTION, Movie};

/// Indexing statistics
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of records embedded and upserted
    pub total_records: usize,

    /// Dimensionality of the stored vectors
    pub dimension: usize,

    /// Total indexing time in seconds
    pub processing_time: f64,
}
