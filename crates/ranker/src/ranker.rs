//! Similarity Ranker - Brute-force Cosine Ranking
//!
//! Ranks the whole catalog against a query embedding and returns the top-k
//! most similar movies.
//!
//! ## Algorithm
//! 1. Drop every item whose title matches the excluded title
//!    (case-insensitive), so exclusions never displace a valid result
//! 2. Score the remaining rows with cosine similarity, in parallel
//! 3. Stable-sort descending by score; equal scores keep catalog order
//! 4. Return the top k
//!
//! The ranker holds no mutable state and the store is read-only, so one
//! ranker can serve any number of concurrent callers.

use crate::similarity::cosine_similarity;
use anyhow::{Result, bail};
use catalog::{EmbeddingStore, MovieId};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// One ranked recommendation candidate
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub id: MovieId,
    pub title: String,
    /// Cosine similarity to the query, in [-1, 1]
    pub score: f32,
}

/// Ranks catalog items by cosine similarity to a query embedding
#[derive(Clone)]
pub struct SimilarityRanker {
    /// Shared reference to the embedding store (read-only, so no Mutex needed)
    store: Arc<EmbeddingStore>,

    /// Optional score floor; candidates below it are dropped
    min_score: Option<f32>,
}

impl SimilarityRanker {
    /// Create a new ranker over the given store
    pub fn new(store: Arc<EmbeddingStore>) -> Self {
        Self {
            store,
            min_score: None,
        }
    }

    /// Configure a minimum similarity score (default: no floor)
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Rank the catalog against a query embedding.
    ///
    /// Returns up to `k` candidates sorted by descending similarity. Items
    /// whose title equals `exclude_title` (case-insensitive) are removed
    /// before ranking. An empty eligible pool yields an empty Vec, not an
    /// error; only a query/store dimensionality mismatch is an error.
    #[instrument(skip(self, query))]
    pub fn rank(
        &self,
        query: &[f32],
        exclude_title: &str,
        k: usize,
    ) -> Result<Vec<RankedCandidate>> {
        if self.store.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.store.dimension() {
            bail!(
                "query vector has {} dimensions, catalog expects {}",
                query.len(),
                self.store.dimension()
            );
        }

        let exclude = exclude_title.to_lowercase();

        // Scored in catalog order; rayon's collect preserves that order,
        // which the stable sort below relies on for tie-breaking.
        let mut scored: Vec<(usize, f32)> = self
            .store
            .items()
            .par_iter()
            .enumerate()
            .filter(|(_, item)| item.title.to_lowercase() != exclude)
            .map(|(idx, item)| (idx, cosine_similarity(query, &item.embedding)))
            .collect();

        debug!("Scored {} eligible candidates", scored.len());

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if let Some(min_score) = self.min_score {
            scored.retain(|(_, score)| *score >= min_score);
        }
        scored.truncate(k);

        let candidates: Vec<RankedCandidate> = scored
            .into_iter()
            .filter_map(|(idx, score)| {
                let item = self.store.get(idx)?;
                Some(RankedCandidate {
                    id: item.id,
                    title: item.title.clone(),
                    score,
                })
            })
            .collect();

        debug!("Ranked {} candidates", candidates.len());
        Ok(candidates)
    }
}
