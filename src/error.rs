//! Error types for the wariai pipeline
//!
//! Domain-specific errors live here; orchestration code at the command level
//! wraps them in `anyhow` with context. The parsing core itself has no error
//! type: every parse failure degrades to the no-match outcome.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server error with status code
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur during harvest orchestration
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Response body did not contain the expected structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur while reading or writing sink files
#[derive(Error, Debug)]
pub enum StorageError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV structure error with 1-based line number
    #[error("Malformed CSV at line {line}: {message}")]
    MalformedCsv { line: usize, message: String },
}
