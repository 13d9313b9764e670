//! Retrieval-augmented answering
//!
//! [`RetrievalOrchestrator`] owns the movie collection and sequences one user
//! turn: embed the query, rank the collection, assemble the conversation and
//! ask the chat model.

use crate::api::chat::{ChatMessage, ChatProvider};
use crate::config::{Config, DEFAULT_SYSTEM_PROMPT};
use crate::error::{RagError, Result};
use crate::ml::{EmbeddingProvider, SearchResult};
use crate::storage::{Collection, IndexStats, Movie};
use std::time::Instant;

/// Per-turn retrieval settings
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorOptions {
    /// Number of movies retrieved per query
    pub top: usize,
    /// System message opening every conversation
    pub system_prompt: String,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            top: 2,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl From<&Config> for OrchestratorOptions {
    fn from(config: &Config) -> Self {
        Self {
            top: config.top,
            system_prompt: config.system_prompt.clone(),
        }
    }
}

/// Outcome of one user turn
#[derive(Debug, Clone)]
pub struct Answer {
    /// Movies retrieved for the query, best first
    pub results: Vec<SearchResult>,
    /// Reply messages from the chat model
    pub messages: Vec<ChatMessage>,
}

impl Answer {
    /// Reply text, one line per message
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .map(|message| message.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Retrieval pipeline over an embedding provider, a chat provider and a collection
pub struct RetrievalOrchestrator<E, C> {
    embedder: E,
    chat: C,
    collection: Collection,
    options: OrchestratorOptions,
    /// Earlier user queries and assistant replies
    history: Vec<ChatMessage>,
}

impl<E: EmbeddingProvider, C: ChatProvider> RetrievalOrchestrator<E, C> {
    /// Create an orchestrator; the embedder must produce vectors of the collection's dimension
    pub fn new(
        embedder: E,
        chat: C,
        collection: Collection,
        options: OrchestratorOptions,
    ) -> Result<Self> {
        if embedder.dimensions() != collection.dimension() {
            return Err(RagError::DimensionMismatch {
                expected: collection.dimension(),
                actual: embedder.dimensions(),
            });
        }

        Ok(Self {
            embedder,
            chat,
            collection,
            options,
            history: Vec::new(),
        })
    }

    /// Embed each movie description and upsert it, one at a time
    pub async fn index<I>(&mut self, movies: I) -> Result<IndexStats>
    where
        I: IntoIterator<Item = Movie>,
    {
        let start_time = Instant::now();
        let mut total_records = 0;

        for movie in movies {
            let vector = self.embedder.embed(&movie.description).await?;
            log::debug!("Indexing movie {} '{}'", movie.key, movie.title);
            self.collection.upsert(movie.with_vector(vector))?;
            total_records += 1;
        }

        let stats = IndexStats {
            total_records,
            dimension: self.collection.dimension(),
            processing_time: start_time.elapsed().as_secs_f64(),
        };

        log::info!(
            "Indexed {} movies into '{}' in {:.2}s",
            stats.total_records,
            self.collection.name(),
            stats.processing_time
        );
        Ok(stats)
    }

    /// Embed the query and return the top movies
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await?;
        self.collection.search(&query_embedding, self.options.top)
    }

    /// Conversation sent to the chat model for `query` and its retrieved movies
    pub fn build_conversation(&self, query: &str, results: &[SearchResult]) -> Vec<ChatMessage> {
        let mut conversation = Vec::with_capacity(2 + self.history.len() + results.len());
        conversation.push(ChatMessage::system(self.options.system_prompt.as_str()));
        conversation.extend(self.history.iter().cloned());
        conversation.push(ChatMessage::user(query));

        for result in results {
            conversation.push(ChatMessage::user(format!(
                "The movie \"{}\" is about: {}",
                result.record.title, result.record.description
            )));
        }

        conversation
    }

    /// Retrieve, then ask the chat model; the exchange is added to the history
    pub async fn answer(&mut self, query: &str) -> Result<Answer> {
        let results = self.retrieve(query).await?;
        self.complete_turn(query, results).await
    }

    /// Ask the chat model about `query` grounded on already retrieved `results`.
    ///
    /// The exchange is added to the history only when the chat call succeeds.
    pub async fn complete_turn(
        &mut self,
        query: &str,
        results: Vec<SearchResult>,
    ) -> Result<Answer> {
        log::debug!("Completing turn with {} retrieved movies", results.len());

        let conversation = self.build_conversation(query, &results);
        let messages = self.chat.complete(&conversation).await?;

        self.history.push(ChatMessage::user(query));
        self.history.extend(messages.iter().cloned());

        Ok(Answer { results, messages })
    }

    /// Answer a query and return only the reply text
    pub async fn respond(&mut self, query: &str) -> Result<String> {
        Ok(self.answer(query).await?.text())
    }

    /// Forget earlier turns
    pub fn clear_history(&mut self) {
        self.history.clear();
        log::debug!("Conversation history cleared");
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }
}
