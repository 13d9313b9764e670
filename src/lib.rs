//! # movie-rag
//!
//! A small retrieval-augmented-generation console assistant. Movie descriptions
//! are embedded into an in-memory collection; each user query retrieves the
//! closest movies by cosine similarity and hands them to a chat model as context.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use movie_rag::{
//!     Collection, Config, MOVIE_COLLECTION, OpenAiChat, OpenAiEmbeddings,
//!     OrchestratorOptions, RetrievalOrchestrator, movie_catalog,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let token = std::env::var("GITHUB_TOKEN")?;
//!
//!     let mut orchestrator = RetrievalOrchestrator::new(
//!         OpenAiEmbeddings::new(&config, &token),
//!         OpenAiChat::new(&config, &token),
//!         Collection::new(MOVIE_COLLECTION, config.dimensions),
//!         OrchestratorOptions::from(&config),
//!     )?;
//!     orchestrator.index(movie_catalog()).await?;
//!
//!     let reply = orchestrator.respond("Something about space travel").await?;
//!     println!("{}", reply);
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ml;
pub mod storage;

// Re-export main API types
pub use api::{
    Answer, ChatMessage, ChatProvider, ChatRole, OpenAiChat, OrchestratorOptions,
    RetrievalOrchestrator, run_chat_session,
};
pub use catalog::movie_catalog;
pub use config::Config;
pub use error::{RagError, Result};

// Re-export commonly used types
pub use ml::{EmbeddingProvider, OpenAiEmbeddings, SearchResult};
pub use storage::{Collection, IndexStats, MOVIE_COLLECTION, Movie};
