//! Error types for the catalog crate.

use crate::types::MovieId;
use thiserror::Error;

/// Errors that can occur while loading the embedding catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in the catalog file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    /// An embedding's length disagrees with the rest of the catalog
    #[error("Embedding for movie {id} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        id: MovieId,
        expected: usize,
        found: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
