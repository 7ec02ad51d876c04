//! # Catalog Crate
//!
//! This crate loads and holds the precomputed movie embedding catalog.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CatalogItem, EmbeddingStore)
//! - **loader**: Parse the JSON-lines artifact into the store
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::EmbeddingStore;
//! use std::path::Path;
//!
//! // Load the whole catalog once at startup
//! let store = EmbeddingStore::load_from_file(Path::new("data/catalog.jsonl"))?;
//!
//! println!("{} movies, {} dimensions", store.len(), store.dimension());
//! ```
//!
//! The store is immutable after load; share it with `Arc<EmbeddingStore>`
//! and hand clones of the `Arc` to every component that ranks against it.

// Public modules
pub mod error;
pub mod loader;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use loader::parse_catalog;
pub use types::{CatalogItem, EmbeddingStore, MovieId};
