//! Text embedding providers
//!
//! [`EmbeddingProvider`] is the seam between the retrieval pipeline and whatever
//! produces vectors. [`OpenAiEmbeddings`] talks to any OpenAI-compatible
//! `/embeddings` endpoint (GitHub Models by default).

use crate::config::Config;
use crate::error::{RagError, Result};
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_openai::{Client, config::OpenAIConfig};
use async_trait::async_trait;

/// Embedding vector type
pub type Embedding = Vec<f32>;

/// Turns text into a fixed-length vector
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Embedding>;

    /// Dimensionality of every vector this provider returns
    fn dimensions(&self) -> usize;
}

/// Embeddings from an OpenAI-compatible endpoint
pub struct OpenAiEmbeddings {
    client: Client<OpenAIConfig>,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbeddings {
    /// Create a provider from configuration and an API credential
    pub fn new(config: &Config, api_key: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(config.endpoint.as_str());

        log::info!(
            "Embedding model: {} ({} dimensions) via {}",
            config.embedding_model,
            config.dimensions,
            config.endpoint
        );

        Self {
            client: Client::with_config(openai_config),
            model: config.embedding_model.clone(),
            dimensions: config.dimensions,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.as_str())
            .input(EmbeddingInput::String(text.to_string()))
            .dimensions(self.dimensions as u32)
            .build()?;

        let response = self.client.embeddings().create(request).await?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| {
                log::error!("Embedding response for model {} had no data", self.model);
                RagError::Provider("No embedding in response".to_string())
            })?;

        if embedding.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }

        log::debug!("Embedded {} chars into {} dimensions", text.len(), embedding.len());
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
