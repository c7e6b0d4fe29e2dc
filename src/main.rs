//! Lantern main entry point
//!
//! This is the command-line interface for the Lantern relevance crawler.

use anyhow::Context;
use clap::Parser;
use lantern::config::load_config;
use lantern::crawler::build_engine;
use lantern::embedding::EmbeddingClient;
use lantern::output::ranked_links;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lantern: a relevance-ranking web crawler
///
/// Lantern crawls breadth-first from a seed URL under a page budget, scores
/// every fetched page against a search query using text embeddings, and
/// prints the visited pages ranked by relevance as JSON.
#[derive(Parser, Debug)]
#[command(name = "lantern")]
#[command(version)]
#[command(about = "A relevance-ranking web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Seed URL to start crawling from
    #[arg(long)]
    url: String,

    /// Search query to rank pages against
    #[arg(long)]
    search: String,

    /// Maximum number of pages to process
    #[arg(long)]
    count: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    // Clamp the requested budget to the configured cap
    let budget = if cli.count > config.crawler.max_pages {
        tracing::warn!(
            "Requested count {} exceeds max-pages {}, clamping",
            cli.count,
            config.crawler.max_pages
        );
        config.crawler.max_pages
    } else {
        cli.count
    };

    // Wire up the engine
    let embedder =
        EmbeddingClient::from_config(&config.embedding).context("embedding client setup failed")?;
    let engine = build_engine(&config, embedder).context("crawl engine setup failed")?;

    // Run the crawl; per-URL failures are absorbed inside the engine
    let result = engine.run(&cli.url, &cli.search, budget).await;
    tracing::info!("Ranked {} page(s)", result.len());

    // Serialize the ranked list
    let links = ranked_links(&result);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&links)?
    } else {
        serde_json::to_string(&links)?
    };
    println!("{}", json);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lantern=info,warn"),
            1 => EnvFilter::new("lantern=debug,info"),
            2 => EnvFilter::new("lantern=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
