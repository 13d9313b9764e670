//! Record schema definitions

use serde::{Deserialize, Serialize};

/// Default embedding dimensionality requested from the embedding model
pub const DEFAULT_DIMENSION: usize = 384;

/// Name of the collection holding the movie catalog
pub const MOVIE_COLLECTION: &str = "movies";

/// A movie record with its description embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique, immutable key
    pub key: u64,
    /// Movie title
    pub title: String,
    /// Short plot description; this is the text that gets embedded
    pub description: String,
    /// Embedding of `description`, empty until indexed
    #[serde(default)]
    pub vector: Vec<f32>,
}

impl Movie {
    /// Create a record without an embedding
    pub fn new(key: u64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            description: description.into(),
            vector: Vec::new(),
        }
    }

    /// Attach an embedding vector
    pub fn with_vector(mut self, vector: Vec<f32>) -> Self {
        self.vector = vector;
        self
    }

    /// Whether the record carries an embedding
    pub fn is_embedded(&self) -> bool {
        !self.vector.is_empty()
    }
}
