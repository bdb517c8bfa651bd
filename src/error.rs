//! Unified error handling for the tastemap crate
//!
//! Domain-specific errors ([`FetchError`], [`LookupError`]) are consolidated
//! into a single [`Error`] enum for use across module boundaries. Recoverability follows the pipeline contract: transport and
//! provider failures degrade a single step to an empty result, while config
//! and storage failures are fatal to the command that hit them.

use std::io;
use thiserror::Error;

/// Errors that can occur while fetching a web page or search result
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Content decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Transport failures are recoverable: the pipeline degrades the step
    /// to an empty result instead of aborting the run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FetchError::InvalidUrl(_))
    }
}

/// Errors from the place-lookup provider
#[derive(Error, Debug)]
pub enum LookupError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an explicit error status
    #[error("Provider status: {0}")]
    Status(String),

    /// Provider response could not be decoded
    #[error("Malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// API key missing from configuration
    #[error("Place lookup API key is not configured")]
    MissingApiKey,
}

/// Unified error type for the tastemap crate
#[derive(Error, Debug)]
pub enum Error {
    /// Page or search fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Place lookup provider errors
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check whether the pipeline may continue after this error.
    ///
    /// Recoverable errors degrade one pipeline step to an empty result;
    /// unrecoverable ones abort the current command.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Lookup(LookupError::MissingApiKey) => false,
            Self::Lookup(_) => true,
            Self::Http(_) => true,
            Self::Io(_) => true,
            Self::Database(_) | Self::Json(_) | Self::Config(_) => false,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
