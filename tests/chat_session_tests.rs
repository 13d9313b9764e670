//! Console session tests driven through in-memory input and output

mod common;

use common::{KeywordEmbedder, RecordingChat, orchestrator};
use movie_rag::{RagError, movie_catalog, run_chat_session};
use std::io::Cursor;

async fn run(input: &str, chat: RecordingChat, show_search_results: bool) -> String {
    let mut orchestrator = orchestrator(KeywordEmbedder::new(), chat, 2);
    orchestrator.index(movie_catalog()).await.unwrap();

    let mut input = Cursor::new(input.to_string());
    let mut output = Vec::new();
    run_chat_session(&mut orchestrator, &mut input, &mut output, show_search_results)
        .await
        .unwrap();

    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_empty_line_ends_session() {
    let chat = RecordingChat::default();
    let output = run("space travel\n\nnever asked\n", chat.clone(), false).await;

    assert!(output.starts_with("Movie search assistant. Starting chat session..."));
    assert!(output.contains("Bot> reply 1"));
    assert!(output.trim_end().ends_with("Goodbye!"));
    assert!(!output.contains("Vector search results:"));
    assert_eq!(chat.call_count(), 1);
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let chat = RecordingChat::default();
    let output = run("dreams", chat.clone(), false).await;

    assert!(output.contains("Bot> reply 1"));
    assert_eq!(chat.call_count(), 1);
}

#[tokio::test]
async fn test_exit_command() {
    let chat = RecordingChat::default();
    run("EXIT\nspace\n", chat.clone(), false).await;
    assert_eq!(chat.call_count(), 0);
}

#[tokio::test]
async fn test_verbose_prints_search_results() {
    let output = run("wormhole\n", RecordingChat::default(), true).await;

    assert!(output.contains("Vector search results:"));
    assert!(output.contains("Title: Interstellar"));
    assert!(output.contains("Score: 1"));
    assert!(output.contains("Title: The Matrix"));
    assert!(!output.contains("Title: Inception"));

    let results_at = output.find("Vector search results:").unwrap();
    let reply_at = output.find("Bot> reply 1").unwrap();
    assert!(results_at < reply_at);
}

#[tokio::test]
async fn test_clear_command_resets_history() {
    let chat = RecordingChat::default();
    let output = run("space\nclear\ndreams\n\n", chat.clone(), false).await;

    assert!(output.contains("Conversation history cleared."));
    assert_eq!(chat.call_count(), 2);

    let conversations = chat.conversations.lock().unwrap();
    // system, query, two retrieved movies
    assert_eq!(conversations[1].len(), 4);
    assert_eq!(conversations[1][1].content, "dreams");
}

#[tokio::test]
async fn test_provider_failure_keeps_session_alive() {
    let chat = RecordingChat::failing();
    let output = run("space\ndreams\n\n", chat.clone(), false).await;

    assert_eq!(
        output
            .matches("Error: retrieval/generation failed")
            .count(),
        2
    );
    assert!(!output.contains("Bot>"));
    assert_eq!(chat.call_count(), 2);
}

#[tokio::test]
async fn test_verbose_results_printed_when_chat_fails() {
    let output = run("wormhole\n\n", RecordingChat::failing(), true).await;

    let results_at = output.find("Title: Interstellar").unwrap();
    let error_at = output
        .find("Error: retrieval/generation failed: chat endpoint returned 429")
        .unwrap();
    assert!(results_at < error_at);
    assert!(output.trim_end().ends_with("Goodbye!"));
}

#[tokio::test]
async fn test_wrong_length_query_embedding_ends_session() {
    let chat = RecordingChat::default();
    // three catalog descriptions embed normally, the first query does not
    let mut orchestrator = orchestrator(KeywordEmbedder::wrong_length_after(3), chat.clone(), 2);
    orchestrator.index(movie_catalog()).await.unwrap();

    let mut input = Cursor::new("space\ndreams\n\n".to_string());
    let mut output = Vec::new();
    let result = run_chat_session(&mut orchestrator, &mut input, &mut output, true).await;

    assert!(matches!(
        result,
        Err(RagError::DimensionMismatch {
            expected: 3,
            actual: 4
        })
    ));
    assert_eq!(chat.call_count(), 0);

    let output = String::from_utf8(output).unwrap();
    assert!(!output.contains("Vector search results:"));
    assert!(!output.contains("Goodbye!"));
    assert!(orchestrator.history().is_empty());
}
