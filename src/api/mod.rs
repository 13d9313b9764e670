//! API layer for movie-rag
//!
//! This module provides the retrieval pipeline, the chat provider seam and the
//! interactive console session.

pub mod chat;
pub mod retriever;

// Re-export main API types
pub use chat::{ChatMessage, ChatProvider, ChatRole, OpenAiChat, run_chat_session};
pub use retriever::{Answer, OrchestratorOptions, RetrievalOrchestrator};
