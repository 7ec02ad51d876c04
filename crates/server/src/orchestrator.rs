//! # Recommendation Orchestrator
//!
//! This module coordinates the recommendation pipeline:
//! 1. Encode the query text into an embedding (external encoder service)
//! 2. Rank the catalog by cosine similarity
//! 3. Enrich the ranked candidates with poster data (parallel)
//! 4. Zip titles with posters, preserving rank order end-to-end
//!
//! The orchestrator owns no state beyond its components; every call is an
//! independent request/response cycle. Poster failures never remove a
//! candidate from the result; they surface as placeholder sentinels in
//! their own slot. Only systemic failures (the encoder, the catalog)
//! propagate as errors.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use catalog::{EmbeddingStore, MovieId};
use encoder_client::TextEncoderClient;
use poster_client::{Poster, PosterClient};
use ranker::{RankedCandidate, SimilarityRanker};

/// Final recommendation returned to the user
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster: Poster,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    ranker: SimilarityRanker,
    encoder: TextEncoderClient,
    posters: PosterClient,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator with all components initialized.
    ///
    /// # Arguments
    /// * `store` - Shared reference to the loaded embedding catalog
    /// * `encoder_addr` - Address of the text encoder service
    ///   (e.g., "http://localhost:50051")
    /// * `posters` - Configured TMDB poster client
    ///
    /// Note: This is an async function because connecting to the encoder
    /// service requires await
    pub async fn new(
        store: Arc<EmbeddingStore>,
        encoder_addr: impl Into<String>,
        posters: PosterClient,
    ) -> Result<Self> {
        let ranker = SimilarityRanker::new(store);
        let encoder = TextEncoderClient::connect(encoder_addr).await?;
        Ok(Self {
            ranker,
            encoder,
            posters,
        })
    }

    /// Main entry point: recommend movies similar to a query.
    ///
    /// # Arguments
    /// * `query_text` - A movie title or free-text description
    /// * `exclude_title` - Title removed from the candidate pool
    ///   (case-insensitive; typically the query itself)
    /// * `k` - Number of recommendations to return
    ///
    /// # Returns
    /// Up to `k` recommendations in descending similarity order, each with
    /// a poster or a placeholder sentinel. An empty catalog or an exclusion
    /// that empties the pool yields `Ok(vec![])`, not an error.
    pub async fn recommend(
        &self,
        query_text: &str,
        exclude_title: &str,
        k: usize,
    ) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();

        // Encode the query
        let query = self.encode_query(query_text).await?;
        info!("Encoded query into {} dimensions", query.len());

        // Rank the catalog
        let ranked = self
            .rank_candidates(query, exclude_title.to_string(), k)
            .await?;
        info!("Ranked {} candidates", ranked.len());

        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        // Enrich with poster data in parallel
        let ids: Vec<MovieId> = ranked.iter().map(|c| c.id).collect();
        let enriched = self.posters.fetch_all(&ids).await;
        info!("Enriched {} candidates with poster data", enriched.len());

        // Zip by position; enrichment never reorders or drops a slot
        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .zip(enriched)
            .map(|(candidate, enrichment)| Recommendation {
                id: candidate.id,
                title: candidate.title,
                score: candidate.score,
                poster: enrichment.poster,
            })
            .collect();

        info!(
            "Produced {} recommendations in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Encode the query text via the external encoder service
    async fn encode_query(&self, query_text: &str) -> Result<Vec<f32>> {
        // The gRPC client needs &mut; clones share the underlying channel
        let mut encoder = self.encoder.clone();
        let query = encoder
            .encode(query_text)
            .await
            .context("Failed to encode query text")?;
        Ok(query)
    }

    /// Rank on a blocking thread; the full-matrix scan is CPU-bound
    async fn rank_candidates(
        &self,
        query: Vec<f32>,
        exclude_title: String,
        k: usize,
    ) -> Result<Vec<RankedCandidate>> {
        let ranker = self.ranker.clone();
        let ranked = tokio::task::spawn_blocking(move || ranker.rank(&query, &exclude_title, k))
            .await
            .context("Ranking task panicked")??;
        Ok(ranked)
    }
}
