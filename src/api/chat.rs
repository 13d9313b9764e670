//! Chat completion and the interactive console session
//!
//! [`ChatProvider`] abstracts the hosted chat model; [`OpenAiChat`] implements it
//! for OpenAI-compatible endpoints. [`run_chat_session`] drives the
//! request/response loop over any reader/writer pair.

use crate::api::retriever::RetrievalOrchestrator;
use crate::config::Config;
use crate::error::{RagError, Result};
use crate::ml::{EmbeddingProvider, SearchResult};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
};
use async_openai::{Client, config::OpenAIConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single conversation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Produces reply messages for a conversation
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the whole conversation and return the model's reply messages
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<Vec<ChatMessage>>;
}

/// Chat completions from an OpenAI-compatible endpoint
pub struct OpenAiChat {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChat {
    /// Create a chat client from configuration and an API credential
    pub fn new(config: &Config, api_key: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(config.endpoint.as_str());

        log::info!("Chat model: {} via {}", config.chat_model, config.endpoint);

        Self {
            client: Client::with_config(openai_config),
            model: config.chat_model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Convert our conversation into async_openai request messages
fn to_request_messages(
    conversation: &[ChatMessage],
) -> Result<Vec<ChatCompletionRequestMessage>> {
    conversation
        .iter()
        .map(|message| -> Result<ChatCompletionRequestMessage> {
            let request_message: ChatCompletionRequestMessage = match message.role {
                ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(ChatCompletionRequestSystemMessageContent::Text(
                        message.content.clone(),
                    ))
                    .build()?
                    .into(),
                ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Text(
                        message.content.clone(),
                    ))
                    .build()?
                    .into(),
                ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(ChatCompletionRequestAssistantMessageContent::Text(
                        message.content.clone(),
                    ))
                    .build()?
                    .into(),
            };
            Ok(request_message)
        })
        .collect()
}

#[async_trait]
impl ChatProvider for OpenAiChat {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(to_request_messages(conversation)?)
            .build()?;

        let response = self.client.chat().create(request).await?;

        let replies: Vec<ChatMessage> = response
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .map(ChatMessage::assistant)
            .collect();

        if replies.is_empty() {
            log::error!("No content in chat response from model {}", self.model);
            return Err(RagError::Provider("No content in response".to_string()));
        }

        Ok(replies)
    }
}

/// Write retrieved movies in the verbose search-results format
pub fn write_search_results<W: Write>(output: &mut W, results: &[SearchResult]) -> Result<()> {
    let separator = "-".repeat(65);

    writeln!(output, "{separator}")?;
    writeln!(output, "Vector search results:")?;
    writeln!(output)?;
    for result in results {
        writeln!(output, "Title: {}", result.record.title)?;
        writeln!(output, "Description: {}", result.record.description)?;
        writeln!(output, "Score: {}", result.score)?;
        writeln!(output)?;
    }
    writeln!(output, "{separator}")?;
    writeln!(output)?;
    Ok(())
}

/// Interactive chat session
///
/// Reads one query per line from `input` until an empty line, end of input,
/// `exit` or `quit`. `clear` forgets earlier turns. A failed provider call is
/// reported and the session continues; any other error ends it.
pub async fn run_chat_session<E, C, R, W>(
    orchestrator: &mut RetrievalOrchestrator<E, C>,
    input: &mut R,
    output: &mut W,
    show_search_results: bool,
) -> Result<()>
where
    E: EmbeddingProvider,
    C: ChatProvider,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Movie search assistant. Starting chat session...")?;

    loop {
        write!(output, "User> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let query = line.trim();
        if query.is_empty() {
            break;
        }

        match query.to_lowercase().as_str() {
            "exit" | "quit" => break,
            "clear" => {
                orchestrator.clear_history();
                writeln!(output, "Conversation history cleared.")?;
                continue;
            }
            _ => {}
        }

        writeln!(output)?;

        let turn = match orchestrator.retrieve(query).await {
            Ok(results) => {
                if show_search_results {
                    write_search_results(output, &results)?;
                }
                orchestrator.complete_turn(query, results).await
            }
            Err(e) => Err(e),
        };

        match turn {
            Ok(answer) => {
                for message in &answer.messages {
                    writeln!(output, "Bot> {}", message.content)?;
                }
            }
            Err(RagError::Provider(e)) => {
                log::warn!("Turn failed: {}", e);
                writeln!(output, "Error: retrieval/generation failed: {e}")?;
            }
            Err(e) => return Err(e),
        }

        writeln!(output)?;
    }

    writeln!(output, "Goodbye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Movie;

    #[test]
    fn test_message_constructors() {
        assert_eq!(ChatMessage::system("s").role, ChatRole::System);
        assert_eq!(ChatMessage::user("u").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("a").content, "a");
    }

    #[test]
    fn test_to_request_messages_preserves_roles() {
        let conversation = vec![
            ChatMessage::system("be nice"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ];
        let messages = to_request_messages(&conversation).unwrap();

        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(messages[2], ChatCompletionRequestMessage::Assistant(_)));
    }

    #[test]
    fn test_write_search_results() {
        let results = vec![SearchResult {
            record: Movie::new(1, "The Matrix", "Hacker learns the truth."),
            score: 0.5,
        }];
        let mut output = Vec::new();
        write_search_results(&mut output, &results).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Vector search results:"));
        assert!(text.contains("Title: The Matrix"));
        assert!(text.contains("Description: Hacker learns the truth."));
        assert!(text.contains("Score: 0.5"));
    }

    #[test]
    fn test_openai_chat_from_config() {
        let chat = OpenAiChat::new(&Config::default(), "token");
        assert_eq!(chat.model(), "Phi-3.5-MoE-instruct");
    }

    #[test]
    fn test_chat_role_serialization() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
