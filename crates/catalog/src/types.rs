//! Core domain types for the embedding catalog.
//!
//! The catalog is the read-only backbone of the recommender: every query is
//! ranked against the same in-memory matrix of precomputed embeddings. It is
//! built once at startup and shared behind an `Arc` for the process lifetime.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// Unique identifier for a movie in the external metadata service (TMDB)
pub type MovieId = u32;

/// One catalog entry: a movie plus its precomputed semantic embedding.
///
/// Titles are NOT guaranteed unique (remakes and re-releases share titles);
/// the catalog keeps every row as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: MovieId,
    pub title: String,
    /// Fixed-length embedding vector; length is uniform across the catalog
    pub embedding: Vec<f32>,
}

/// The in-memory embedding store.
///
/// Holds the catalog items in load order; the embedding rows, taken in the
/// same order, form the dense matrix that ranking scans. Read-only after
/// construction, so it can be shared across threads without locking.
#[derive(Debug)]
pub struct EmbeddingStore {
    items: Vec<CatalogItem>,
    dimension: usize,
}

impl EmbeddingStore {
    /// Build a store from already-parsed items, validating that every
    /// embedding has the same dimensionality.
    ///
    /// An empty item list is valid (dimension 0); every query against it
    /// simply produces no candidates.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self> {
        let dimension = items.first().map(|item| item.embedding.len()).unwrap_or(0);

        for item in &items {
            if item.embedding.len() != dimension {
                return Err(CatalogError::DimensionMismatch {
                    id: item.id,
                    expected: dimension,
                    found: item.embedding.len(),
                });
            }
        }

        Ok(Self { items, dimension })
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Embedding dimensionality shared by every row
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// All items, in load order (the order ranking uses to break ties)
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Get an item by its position in the catalog
    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: MovieId, title: &str, embedding: Vec<f32>) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            embedding,
        }
    }

    #[test]
    fn test_from_items_basic() {
        let store = EmbeddingStore::from_items(vec![
            item(1, "Alpha", vec![1.0, 0.0]),
            item(2, "Beta", vec![0.0, 1.0]),
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.dimension(), 2);
        assert_eq!(store.get(0).unwrap().title, "Alpha");
        assert_eq!(store.get(1).unwrap().id, 2);
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_from_items_empty_catalog_is_valid() {
        let store = EmbeddingStore::from_items(vec![]).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.dimension(), 0);
    }

    #[test]
    fn test_from_items_rejects_mixed_dimensions() {
        let result = EmbeddingStore::from_items(vec![
            item(1, "Alpha", vec![1.0, 0.0]),
            item(2, "Beta", vec![0.0, 1.0, 0.5]),
        ]);

        match result {
            Err(CatalogError::DimensionMismatch {
                id,
                expected,
                found,
            }) => {
                assert_eq!(id, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_titles_are_kept() {
        let store = EmbeddingStore::from_items(vec![
            item(1, "Solaris", vec![1.0]),
            item(2, "Solaris", vec![0.5]),
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().title, store.get(1).unwrap().title);
    }
}
