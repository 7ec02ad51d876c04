//! TMDB poster fetching with bounded concurrency and per-slot degradation.
//!
//! `fetch_one` never fails from the caller's point of view: every error path
//! ends in a sentinel. `fetch_all` fans a batch out to one task per id and
//! fans back in by spawn order, so results always line up positionally with
//! the request list (ids may repeat, so correlation is by position, never by
//! id).

use crate::retry::{FailureKind, RetryDecision, RetryPolicy};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const DEFAULT_LANGUAGE: &str = "en-US";

/// Per-attempt request timeout; must stay shorter than the retry backoff
/// ceiling
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of resolving one movie's poster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poster {
    /// Fully-resolved image URL
    Available(String),
    /// The metadata service answered, but has no poster on record
    Missing,
    /// The fetch failed (exhausted retries, timeout, or permanent error)
    Unavailable,
}

impl Poster {
    /// The resolved URL, if there is one. Both sentinel flavors answer
    /// `None` and render identically; they differ only in logging.
    pub fn url(&self) -> Option<&str> {
        match self {
            Poster::Available(url) => Some(url),
            Poster::Missing | Poster::Unavailable => None,
        }
    }
}

/// One enrichment outcome, position-aligned with the request list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentResult {
    pub movie_id: u32,
    pub poster: Poster,
}

/// Subset of the TMDB movie-details body we care about
#[derive(Debug, Deserialize)]
struct MovieDetails {
    poster_path: Option<String>,
}

/// A failed fetch attempt, classified for the retry policy
#[derive(Debug)]
enum FetchFailure {
    Status(StatusCode),
    Request(reqwest::Error),
    MalformedBody(String),
}

impl FetchFailure {
    fn kind(&self) -> FailureKind {
        match self {
            // Exactly the transient server statuses; 501 and the 4xx
            // family stay permanent
            FetchFailure::Status(status) => match status.as_u16() {
                500 | 502 | 503 | 504 => FailureKind::Transient,
                _ => FailureKind::Permanent,
            },
            FetchFailure::Request(e) if e.is_timeout() || e.is_connect() || e.is_request() => {
                FailureKind::Transient
            }
            FetchFailure::Request(_) => FailureKind::Permanent,
            FetchFailure::MalformedBody(_) => FailureKind::Permanent,
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Status(status) => write!(f, "HTTP status {}", status),
            FetchFailure::Request(e) => write!(f, "request error: {}", e),
            FetchFailure::MalformedBody(reason) => write!(f, "malformed body: {}", reason),
        }
    }
}

/// Concurrent, retrying client for the TMDB movie-details endpoint
#[derive(Clone)]
pub struct PosterClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
    retry: RetryPolicy,
    limiter: Arc<Semaphore>,
}

impl PosterClient {
    /// Create a client with production defaults: TMDB endpoints, 10s
    /// request timeout, default retry policy, worker pool sized to the
    /// machine's available parallelism.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build TMDB HTTP client")?;

        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            retry: RetryPolicy::default(),
            limiter: Arc::new(Semaphore::new(workers)),
        })
    }

    /// Configure the metadata API base URL (default: the public TMDB API)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Configure the image base URL prepended to `poster_path`
    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }

    /// Configure the metadata language (default: "en-US")
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Configure the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Configure the worker-pool size for batch fetches
    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.limiter = Arc::new(Semaphore::new(workers.max(1)));
        self
    }

    /// Resolve one movie's poster. Never errors: every failure path lands
    /// on a sentinel, logged at a level matching its flavor.
    #[instrument(skip(self))]
    pub async fn fetch_one(&self, movie_id: u32) -> Poster {
        let mut attempt = 1u32;
        loop {
            match self.try_fetch(movie_id).await {
                Ok(poster) => return poster,
                Err(failure) => match self.retry.decide(attempt, failure.kind()) {
                    RetryDecision::RetryAfter(delay) => {
                        debug!(
                            movie_id,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %failure,
                            "Retrying poster fetch"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    RetryDecision::GiveUp => {
                        warn!(movie_id, attempt, error = %failure, "Poster fetch failed");
                        return Poster::Unavailable;
                    }
                },
            }
        }
    }

    /// One fetch attempt against the movie-details endpoint
    async fn try_fetch(&self, movie_id: u32) -> std::result::Result<Poster, FetchFailure> {
        let url = format!("{}/movie/{}", self.base_url, movie_id);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(FetchFailure::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status));
        }

        let details: MovieDetails = response
            .json()
            .await
            .map_err(|e| FetchFailure::MalformedBody(e.to_string()))?;

        match details.poster_path {
            Some(path) => Ok(Poster::Available(format!("{}{}", self.image_base_url, path))),
            None => {
                debug!(movie_id, "No poster on record");
                Ok(Poster::Missing)
            }
        }
    }

    /// Resolve posters for a whole batch.
    ///
    /// Dispatches one task per id, bounded by the worker pool, and awaits
    /// the handles in spawn order: `output[i]` always corresponds to
    /// `ids[i]` no matter when each fetch completes. A failed or panicked
    /// task degrades only its own slot; the batch always waits for every
    /// member.
    pub async fn fetch_all(&self, ids: &[u32]) -> Vec<EnrichmentResult> {
        debug!(count = ids.len(), "Fetching posters");

        let mut handles = Vec::with_capacity(ids.len());
        for &movie_id in ids {
            let client = self.clone();
            handles.push(tokio::spawn(async move {
                let _permit = client
                    .limiter
                    .clone()
                    .acquire_owned()
                    .await
                    .expect("poster worker pool closed");
                client.fetch_one(movie_id).await
            }));
        }

        let mut results = Vec::with_capacity(ids.len());
        for (handle, &movie_id) in handles.into_iter().zip(ids) {
            let poster = match handle.await {
                Ok(poster) => poster,
                Err(e) => {
                    warn!(movie_id, error = %e, "Poster fetch task failed");
                    Poster::Unavailable
                }
            };
            results.push(EnrichmentResult { movie_id, poster });
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url_accessor() {
        let available = Poster::Available("https://image.tmdb.org/t/p/w500/x.jpg".to_string());
        assert_eq!(
            available.url(),
            Some("https://image.tmdb.org/t/p/w500/x.jpg")
        );
        assert_eq!(Poster::Missing.url(), None);
        assert_eq!(Poster::Unavailable.url(), None);
    }

    #[test]
    fn test_sentinel_flavors_are_distinct() {
        assert_ne!(Poster::Missing, Poster::Unavailable);
    }

    #[test]
    fn test_status_classification() {
        for code in [500u16, 502, 503, 504] {
            let failure = FetchFailure::Status(StatusCode::from_u16(code).unwrap());
            assert_eq!(failure.kind(), FailureKind::Transient, "status {}", code);
        }
        for code in [400u16, 401, 404, 418, 422, 501] {
            let failure = FetchFailure::Status(StatusCode::from_u16(code).unwrap());
            assert_eq!(failure.kind(), FailureKind::Permanent, "status {}", code);
        }
    }

    #[test]
    fn test_malformed_body_is_permanent() {
        let failure = FetchFailure::MalformedBody("expected value at line 1".to_string());
        assert_eq!(failure.kind(), FailureKind::Permanent);
    }

    #[test]
    fn test_missing_poster_path_deserializes_to_none() {
        let details: MovieDetails = serde_json::from_str(r#"{"title": "Alpha"}"#).unwrap();
        assert!(details.poster_path.is_none());

        let details: MovieDetails =
            serde_json::from_str(r#"{"title": "Alpha", "poster_path": null}"#).unwrap();
        assert!(details.poster_path.is_none());

        let details: MovieDetails =
            serde_json::from_str(r#"{"title": "Alpha", "poster_path": "/a.jpg"}"#).unwrap();
        assert_eq!(details.poster_path.as_deref(), Some("/a.jpg"));
    }
}
