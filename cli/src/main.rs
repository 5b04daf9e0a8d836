//! Vibe Matcher CLI Entry Point
//!
//! Embeds the product catalog once, then either answers a single
//! `--query` or prompts for vibes until EOF.

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibe_matcher::{MatchConfig, MatchResult, OllamaConfig, VectorEngine};
use vibe_matcher_cli::render::{render_json, render_text};
use vibe_matcher_cli::{CatalogSource, CliResult, VibeService};

#[derive(Parser)]
#[command(name = "vibe-matcher")]
#[command(about = "Find products that match a described vibe")]
#[command(version)]
struct Args {
    /// Vibe to match; omit for interactive mode
    #[arg(long, short)]
    query: Option<String>,

    /// Maximum number of matches to show
    #[arg(long, short = 'n', default_value_t = 3)]
    top_n: usize,

    /// Minimum similarity score for a match
    #[arg(long, short, default_value_t = 0.6, allow_negative_numbers = true)]
    threshold: f32,

    /// JSON file with `[{"name": ..., "description": ...}]` (default: built-in sample)
    #[arg(long, short)]
    catalog: Option<PathBuf>,

    /// Ollama base URL (default: $VIBE_OLLAMA_URL, $OLLAMA_HOST, http://localhost:11434)
    #[arg(long)]
    ollama_url: Option<String>,

    /// Embedding model (default: $VIBE_EMBED_MODEL or nomic-embed-text)
    #[arg(long)]
    model: Option<String>,

    /// Embedding request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Required embedding dimension (learned from the first vector if unset)
    #[arg(long)]
    dimension: Option<usize>,

    /// Print matches as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibe_matcher_cli=info,vibe_matcher=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(args).await {
        tracing::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(args: Args) -> CliResult<()> {
    let mut ollama = OllamaConfig::discover(args.ollama_url.as_deref(), args.model.as_deref())?;
    ollama.timeout_secs = args.timeout_secs;
    ollama.expected_dimension = args.dimension;

    let source = match args.catalog {
        Some(path) => CatalogSource::File(path),
        None => CatalogSource::Sample,
    };

    let engine = Arc::new(VectorEngine::new(ollama));
    let service = VibeService::new(engine, source);
    service.initialize().await?;

    let config = MatchConfig::new(args.top_n, args.threshold);

    match args.query {
        Some(query) => {
            let results = service.find_matches(&query, &config).await?;
            print_results(&results, args.json)
        }
        None => interactive(&service, &config, args.json).await,
    }
}

async fn interactive(service: &VibeService, config: &MatchConfig, json: bool) -> CliResult<()> {
    println!("Describe a vibe, and I'll find the perfect products for you!");
    println!("(':reload' re-embeds the catalog, 'quit' exits)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("Enter a vibe (e.g., 'energetic urban chic'): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            return Ok(());
        };

        // Failures are logged; the session keeps going
        match line.trim() {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            ":reload" => {
                match service.reload().await {
                    Ok(count) => println!("Catalog reloaded ({} products)", count),
                    Err(e) => tracing::error!("Reload failed, keeping current catalog: {}", e),
                }
                continue;
            }
            _ => {}
        }

        tracing::debug!("Finding your vibe: {}", line);
        match service.find_matches(&line, config).await {
            Ok(results) => print_results(&results, json)?,
            Err(e) => tracing::error!("{}", e),
        }
    }
}

fn print_results(results: &[MatchResult], json: bool) -> CliResult<()> {
    if json {
        let out = render_json(results).map_err(vibe_matcher::VibeError::from)?;
        println!("{}", out);
    } else {
        print!("{}", render_text(results));
    }
    Ok(())
}
