use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use catalog::EmbeddingStore;
use poster_client::PosterClient;
use server::{Recommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

mod config;
use config::TmdbConfig;

/// CineMatch - Semantic Movie Recommendations
#[derive(Parser)]
#[command(name = "cine-match")]
#[command(about = "Movie recommendations from precomputed semantic embeddings", long_about = None)]
struct Cli {
    /// Path to the embedding catalog (JSON lines)
    #[arg(short, long, default_value = "data/catalog.jsonl")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title or free-text query
    Recommend {
        /// Movie title or free-text description to match against
        #[arg(long)]
        query: String,

        /// Title to exclude from results (defaults to the query itself)
        #[arg(long)]
        exclude: Option<String>,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Address of the text encoder service
        #[arg(long, default_value = "http://localhost:50051")]
        encoder_addr: String,
    },

    /// Search the catalog for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show catalog statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the embedding catalog (this may take a moment)
    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let store = Arc::new(EmbeddingStore::load_from_file(&cli.catalog)?);
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            query,
            exclude,
            limit,
            encoder_addr,
        } => handle_recommend(store, query, exclude, limit, encoder_addr).await?,
        Commands::Search { title } => handle_search(store, title)?,
        Commands::Stats => handle_stats(store)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    store: Arc<EmbeddingStore>,
    query: String,
    exclude: Option<String>,
    limit: usize,
    encoder_addr: String,
) -> Result<()> {
    let config = TmdbConfig::from_env()?;
    let posters = PosterClient::new(config.tmdb_api_key)?.with_base_url(config.tmdb_api_url);

    // When the query is itself a catalog title, it shouldn't recommend itself
    let exclude = exclude.unwrap_or_else(|| query.clone());

    let orchestrator = RecommendationOrchestrator::new(store, encoder_addr, posters).await?;
    let recommendations = orchestrator.recommend(&query, &exclude, limit).await?;

    if recommendations.is_empty() {
        println!("{}", "No recommendations found.".yellow());
        return Ok(());
    }

    print_recommendations(&query, &recommendations);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(store: Arc<EmbeddingStore>, title: String) -> Result<()> {
    let title_lower = title.to_lowercase();
    let mut matches: Vec<(u32, &str, usize)> = Vec::new();

    for item in store.items() {
        let item_title_lower = item.title.to_lowercase();

        if item_title_lower == title_lower {
            // Exact match sorts first
            matches.push((item.id, &item.title, 0));
        } else if item_title_lower.contains(&title_lower) {
            matches.push((item.id, &item.title, 1));
        }
    }
    matches.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| a.1.cmp(b.1)));

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for (id, item_title, _) in matches.iter().take(20) {
        println!("{}: {}", id.to_string().green(), item_title);
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(store: Arc<EmbeddingStore>) -> Result<()> {
    println!("{}", "Catalog statistics:".bold().blue());
    println!("{}Movies: {}", "• ".green(), store.len());
    println!("{}Embedding dimensions: {}", "• ".green(), store.dimension());

    println!("Sample titles:");
    for item in store.items().iter().take(5) {
        println!("  - {} ({})", item.title, item.id);
    }
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(query: &str, recommendations: &[Recommendation]) {
    println!(
        "{}",
        format!("Movies similar to '{}':\n", query).bold().blue()
    );
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.title.bold(),
            rec.score
        );
        match rec.poster.url() {
            Some(url) => println!("   Poster: {}", url),
            None => println!("   Poster: {}", "unavailable".dimmed()),
        }
    }
}
