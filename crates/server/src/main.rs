//! Simple test harness for the recommendation orchestrator.
//!
//! This binary lets you test the end-to-end pipeline with one query against
//! a loaded catalog, a running encoder service, and the real TMDB API.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use catalog::EmbeddingStore;
use poster_client::PosterClient;
use server::RecommendationOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,ranker=debug,poster_client=debug")
        .init();

    info!("Starting CineMatch server test harness");

    info!("Loading embedding catalog...");
    let path = Path::new("data/catalog.jsonl");
    let store = Arc::new(EmbeddingStore::load_from_file(path)?);
    info!("Catalog loaded successfully");

    let api_key =
        std::env::var("TMDB_API_KEY").context("TMDB_API_KEY must be set in the environment")?;
    let posters = PosterClient::new(api_key)?;

    // Make sure the encoder service is running on localhost:50051
    info!("Connecting to encoder service...");
    let orchestrator =
        RecommendationOrchestrator::new(store, "http://localhost:50051", posters).await?;
    info!("Connected to encoder service");

    // Try a sample query
    let query = "Toy Story";
    let limit = 5;

    info!("Getting recommendations for '{}' (limit: {})", query, limit);
    let recommendations = orchestrator.recommend(query, query, limit).await?;

    info!("Received {} recommendations:", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} - Score: {:.3} [{}]",
            i + 1,
            rec.title,
            rec.score,
            rec.poster.url().unwrap_or("no poster")
        );
    }

    Ok(())
}
