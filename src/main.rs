use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::warn;
use std::time::Duration;
use vector_console::api::{DEFAULT_SIMILAR_RESULTS, RetrievalWeight, SearchConfig};
use vector_console::commands;
use vector_console::config::ConsoleConfig;

/// vector-console - operator console for a vector-search backend
///
/// Submit queries, tune retrieval parameters and inspect ranked chunks.
/// Every backend call is retried a fixed number of times with a fixed delay,
/// so a backend that is still starting up has time to come online.
///
/// Examples:
///   vector-console search "how does the borrow checker work?"
///   vector-console configure --retrieval-weight semantic --recall-number 20
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (defaults to http://localhost:8000)
    #[arg(long, env = "VECTOR_CONSOLE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Attempts per backend call before giving up
    #[arg(
        long,
        env = "VECTOR_CONSOLE_MAX_RETRIES",
        default_value_t = vector_console::http::MAX_RETRIES,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
        global = true
    )]
    max_retries: usize,

    /// Pause between attempts, in milliseconds
    #[arg(
        long,
        env = "VECTOR_CONSOLE_RETRY_DELAY_MS",
        default_value_t = vector_console::http::RETRY_DELAY_MS,
        value_name = "MS",
        global = true
    )]
    retry_delay_ms: u64,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Submit a query and show the retrieved chunks
    Search(SearchArgs),

    /// Apply vector search configuration on the backend
    Configure(ConfigureArgs),

    /// List queries similar to the given one
    Similar(SimilarArgs),
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// The complete user question
    #[arg(value_name = "QUERY")]
    query: String,
}

#[derive(clap::Args, Debug)]
struct ConfigureArgs {
    /// Minimum document correlation (0.0 - 0.95)
    #[arg(long, default_value_t = 0.85)]
    doc_correlation: f64,

    /// Number of chunks to recall (1 - 50)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=50))]
    recall_number: u32,

    /// Knowledge retrieval weighting
    #[arg(long, value_enum, default_value_t = WeightArg::Mixed)]
    retrieval_weight: WeightArg,

    /// Semantic share for mixed retrieval (0 - 100, defaults to 50)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    mixed_percentage: Option<u8>,

    /// Enable the rerank model
    #[arg(long)]
    rerank: bool,
}

#[derive(clap::Args, Debug)]
struct SimilarArgs {
    #[arg(value_name = "QUERY")]
    query: String,

    /// Maximum number of similar queries to return
    #[arg(long, default_value_t = DEFAULT_SIMILAR_RESULTS)]
    max_results: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum WeightArg {
    Mixed,
    Semantic,
    Keyword,
}

impl ConfigureArgs {
    fn to_search_config(&self) -> Result<SearchConfig> {
        let weight = match self.retrieval_weight {
            WeightArg::Mixed => RetrievalWeight::Mixed {
                percentage: self.mixed_percentage.unwrap_or(50),
            },
            other => {
                if self.mixed_percentage.is_some() {
                    warn!("--mixed-percentage only applies to mixed retrieval, ignoring it");
                }
                match other {
                    WeightArg::Semantic => RetrievalWeight::Semantic,
                    _ => RetrievalWeight::Keyword,
                }
            }
        };

        SearchConfig::new(
            self.doc_correlation,
            self.recall_number,
            weight,
            self.rerank,
        )
        .context("Invalid search configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = ConsoleConfig::new(
        cli.base_url,
        cli.max_retries,
        Duration::from_millis(cli.retry_delay_ms),
    );
    let client = config.build_client()?;
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Search(args) => {
            commands::search(&client, &args.query, &mut out).await?;
        }
        Commands::Configure(args) => {
            let search_config = args.to_search_config()?;
            commands::configure(&client, search_config, &mut out).await?;
        }
        Commands::Similar(args) => {
            commands::similar(&client, &args.query, args.max_results, &mut out).await?;
        }
    }
    Ok(())
}
