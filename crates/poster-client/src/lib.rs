//! # Poster Client Crate
//!
//! Concurrent, retrying client for the TMDB movie-metadata service.
//!
//! ## Components
//!
//! ### PosterClient
//! Fetches one poster URL per movie id over HTTP:
//! - Task-per-id fan-out, bounded by a worker pool
//! - Fan-in by request position, regardless of completion order
//! - Exponential-backoff retries for transient failures only
//! - Every per-id failure degrades to a sentinel; nothing aborts the batch
//!
//! ### RetryPolicy
//! The retry schedule as a pure decision function, testable without any
//! network in sight.
//!
//! ## Example Usage
//!
//! ```ignore
//! use poster_client::PosterClient;
//!
//! let client = PosterClient::new(api_key)?;
//! let results = client.fetch_all(&[603, 604, 605]).await;
//! for result in &results {
//!     match result.poster.url() {
//!         Some(url) => println!("{} -> {}", result.movie_id, url),
//!         None => println!("{} -> placeholder", result.movie_id),
//!     }
//! }
//! ```

// Public modules
pub mod client;
pub mod retry;

// Re-export commonly used types
pub use client::{EnrichmentResult, Poster, PosterClient};
pub use retry::{FailureKind, RetryDecision, RetryPolicy};
