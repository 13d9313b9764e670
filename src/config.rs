//! Configuration for movie-rag
//!
//! Settings come from [`Config::default`], optionally overlaid by a JSON file,
//! then by command-line flags. The API credential is resolved separately by
//! [`resolve_token`].

use crate::error::{RagError, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::Path;

/// GitHub Models inference endpoint (OpenAI-compatible)
pub const DEFAULT_ENDPOINT: &str = "https://models.inference.ai.azure.com";

/// Default system prompt for the movie assistant
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly assistant who helps me select a movie to watch based my preferences. Only recommend movies I tell you about.";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the OpenAI-compatible model endpoint
    pub endpoint: String,
    /// Embedding model name
    pub embedding_model: String,
    /// Chat completion model name
    pub chat_model: String,
    /// Vector dimensionality requested from the embedding model
    pub dimensions: usize,
    /// Number of movies retrieved per query
    pub top: usize,
    /// Print retrieved movies and scores before each reply
    pub show_search_results: bool,
    /// System message opening every conversation
    pub system_prompt: String,
    /// Environment variable holding the API credential
    pub token_env_var: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            chat_model: "Phi-3.5-MoE-instruct".to_string(),
            dimensions: crate::storage::DEFAULT_DIMENSION,
            top: 2,
            show_search_results: false,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            token_env_var: "GITHUB_TOKEN".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;

        log::info!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(RagError::Config("endpoint must not be empty".to_string()));
        }
        if self.embedding_model.trim().is_empty() {
            return Err(RagError::Config(
                "embedding_model must not be empty".to_string(),
            ));
        }
        if self.chat_model.trim().is_empty() {
            return Err(RagError::Config("chat_model must not be empty".to_string()));
        }
        if self.dimensions == 0 {
            return Err(RagError::Config(
                "dimensions must be greater than zero".to_string(),
            ));
        }
        if self.token_env_var.trim().is_empty() {
            return Err(RagError::Config(
                "token_env_var must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Look up the credential in the process environment, then in a local `.env` file
pub fn lookup_token(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            // dotenvy::var also consults the process environment after loading `.env`
            dotenvy::var(var)
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
}

/// Prompt on `output` until a non-empty credential is read from `input`
pub fn prompt_for_token<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    loop {
        write!(output, "Please enter a valid github token: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(RagError::Config(
                "input closed before a token was entered".to_string(),
            ));
        }

        let token = line.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }
}

/// Resolve the API credential: environment, `.env`, then interactive prompt
pub fn resolve_token<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    match lookup_token(&config.token_env_var) {
        Some(token) => {
            log::debug!("Using credential from {}", config.token_env_var);
            Ok(token)
        }
        None => {
            log::info!("{} not set, prompting for a token", config.token_env_var);
            prompt_for_token(input, output)
        }
    }
}
