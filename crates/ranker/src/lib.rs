//! # Ranker Crate
//!
//! This crate ranks catalog movies by semantic similarity to a query.
//!
//! ## Components
//!
//! ### Similarity
//! Cosine similarity between embedding vectors, with the zero-norm
//! degenerate case defined as 0.0 rather than a division by zero.
//!
//! ### SimilarityRanker
//! Brute-force top-k ranking over the whole embedding matrix:
//! - Exclusion by title (case-insensitive) before scoring
//! - Parallel scoring with Rayon
//! - Stable descending sort, catalog order as tie-break
//!
//! ## Example Usage
//!
//! ```ignore
//! use ranker::SimilarityRanker;
//! use catalog::EmbeddingStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(EmbeddingStore::load_from_file("data/catalog.jsonl".as_ref())?);
//! let ranker = SimilarityRanker::new(store);
//!
//! let top = ranker.rank(&query_embedding, "The Matrix", 5)?;
//! ```
//!
//! At catalog scale (thousands of rows) a full scan is a few milliseconds;
//! no approximate index is warranted.

// Public modules
pub mod ranker;
pub mod similarity;

// Re-export commonly used types
pub use ranker::{RankedCandidate, SimilarityRanker};
pub use similarity::cosine_similarity;

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogItem, EmbeddingStore};
    use std::sync::Arc;

    #[test]
    fn test_ranker_creation() {
        let store = Arc::new(
            EmbeddingStore::from_items(vec![CatalogItem {
                id: 1,
                title: "Test Movie (2000)".to_string(),
                embedding: vec![1.0, 0.0],
            }])
            .unwrap(),
        );

        let ranker = SimilarityRanker::new(store);
        let ranked = ranker.rank(&[1.0, 0.0], "", 1).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, 1);
    }
}
