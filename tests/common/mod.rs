//! Deterministic providers shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use movie_rag::{
    ChatMessage, ChatProvider, Collection, EmbeddingProvider, MOVIE_COLLECTION,
    OrchestratorOptions, RagError, Result, RetrievalOrchestrator,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Three-axis keyword embedder: mind games, dreams, space
pub struct KeywordEmbedder {
    pub calls: Arc<AtomicUsize>,
    /// Fail every call after this many successful ones
    pub fail_after: Option<usize>,
    /// Return one extra component on every call after this many
    pub wrong_length_after: Option<usize>,
    pub dimensions: usize,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            fail_after: None,
            wrong_length_after: None,
            dimensions: 3,
        }
    }

    pub fn failing_after(successes: usize) -> Self {
        Self {
            fail_after: Some(successes),
            ..Self::new()
        }
    }

    pub fn wrong_length_after(calls: usize) -> Self {
        Self {
            wrong_length_after: Some(calls),
            ..Self::new()
        }
    }
}

const AXES: [&[&str]; 3] = [
    &["hacker", "reality", "rebels", "computer", "matrix"],
    &["dream", "idea", "thief", "mind", "secrets"],
    &["space", "wormhole", "explorers", "humanity", "stars"],
];

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after {
            if call >= limit {
                return Err(RagError::Provider("embedding endpoint unavailable".to_string()));
            }
        }

        let text = text.to_lowercase();
        let mut vector: Vec<f32> = AXES
            .iter()
            .map(|words| words.iter().filter(|w| text.contains(*w)).count() as f32)
            .collect();
        let length = match self.wrong_length_after {
            Some(limit) if call >= limit => self.dimensions + 1,
            _ => self.dimensions,
        };
        vector.resize(length, 0.0);
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Chat provider that records every conversation it receives
#[derive(Clone, Default)]
pub struct RecordingChat {
    pub conversations: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    pub fail: bool,
}

impl RecordingChat {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last_conversation(&self) -> Vec<ChatMessage> {
        self.conversations
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.conversations.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
        let turn = {
            let mut conversations = self.conversations.lock().unwrap();
            conversations.push(conversation.to_vec());
            conversations.len()
        };

        if self.fail {
            return Err(RagError::Provider("chat endpoint returned 429".to_string()));
        }

        Ok(vec![ChatMessage::assistant(format!("reply {turn}"))])
    }
}

pub fn orchestrator(
    embedder: KeywordEmbedder,
    chat: RecordingChat,
    top: usize,
) -> RetrievalOrchestrator<KeywordEmbedder, RecordingChat> {
    RetrievalOrchestrator::new(
        embedder,
        chat,
        Collection::new(MOVIE_COLLECTION, 3),
        OrchestratorOptions {
            top,
            ..OrchestratorOptions::default()
        },
    )
    .unwrap()
}
