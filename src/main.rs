//! movie-rag CLI application
//!
//! Command-line interface for the movie-rag library.

use anyhow::Context;
use clap::{Parser, Subcommand};
use movie_rag::config::resolve_token;
use movie_rag::{
    Collection, Config, MOVIE_COLLECTION, OpenAiChat, OpenAiEmbeddings, OrchestratorOptions,
    RetrievalOrchestrator, movie_catalog, run_chat_session,
};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "movie-rag")]
#[command(about = "Retrieval-augmented movie recommendations over an in-memory vector collection")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// OpenAI-compatible endpoint base URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Embedding model name
    #[arg(long, global = true)]
    embedding_model: Option<String>,

    /// Chat model name
    #[arg(long, global = true)]
    chat_model: Option<String>,

    /// Number of movies retrieved per query
    #[arg(short = 'k', long, global = true)]
    top: Option<usize>,

    /// Print retrieved movies and scores before each reply
    #[arg(short, long, global = true)]
    show_search_results: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat grounded on the movie catalog (default)
    Chat,

    /// Print the movies closest to a query without calling the chat model
    Search {
        /// Search query
        query: String,
    },
}

impl Cli {
    /// Defaults, overlaid by the config file, overlaid by flags
    fn build_config(&self) -> movie_rag::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.embedding_model {
            config.embedding_model = model.clone();
        }
        if let Some(model) = &self.chat_model {
            config.chat_model = model.clone();
        }
        if let Some(top) = self.top {
            config.top = top;
        }
        if self.show_search_results {
            config.show_search_results = true;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.build_config().context("invalid configuration")?;

    let mut input = io::stdin().lock();
    let mut output = io::stdout();

    let token = resolve_token(&config, &mut input, &mut output)?;

    let mut orchestrator = RetrievalOrchestrator::new(
        OpenAiEmbeddings::new(&config, &token),
        OpenAiChat::new(&config, &token),
        Collection::new(MOVIE_COLLECTION, config.dimensions),
        OrchestratorOptions::from(&config),
    )?;

    orchestrator
        .index(movie_catalog())
        .await
        .context("failed to index the movie catalog")?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            run_chat_session(
                &mut orchestrator,
                &mut input,
                &mut output,
                config.show_search_results,
            )
            .await?;
        }
        Commands::Search { query } => {
            let results = orchestrator.retrieve(&query).await?;

            if results.is_empty() {
                println!("No results found");
                return Ok(());
            }

            println!("Found {} results:", results.len());
            println!();

            for (i, result) in results.iter().enumerate() {
                println!("{}. {} (Score: {:.3})", i + 1, result.record.title, result.score);
                println!("   {}", result.record.description);
                println!();
            }
        }
    }

    Ok(())
}
