//! Error types for Folio operations.
//!
//! [`FolioError`] covers every failure the reader pipeline can hit, from URL
//! validation through fetching and parsing. The pipeline never lets these
//! escape to its caller: [`crate::Reader::render`] folds them into a
//! [`crate::RenderOutcome::Rejected`] carrying the error's display text, so
//! the `Display` strings here are user-facing.
//!
//! # Example
//!
//! ```rust
//! use folio_core::FolioError;
//!
//! let err = FolioError::UpstreamStatus(404);
//! assert_eq!(err.to_string(), "Upstream error 404");
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the reader pipeline.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Input could not be turned into an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The upstream server answered with a non-success status.
    #[error("Upstream error {0}")]
    UpstreamStatus(u16),

    /// The upstream response did not declare an HTML content type.
    ///
    /// Raised from the response headers, before any of the body is read.
    #[error("Not an HTML document")]
    NotHtml,

    /// Transport failures: DNS, TLS, connection reset, redirect loops.
    ///
    /// Displays the underlying client message unchanged.
    #[error("{0}")]
    Network(String),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The response body is larger than the configured cap.
    #[error("Response body exceeds {limit} bytes")]
    ContentTooLarge { limit: usize },

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No readability candidate reached the score threshold.
    #[error("Content is not readable (score {score} below threshold {threshold})")]
    NotReadable { score: f64, threshold: f64 },

    /// No content candidates at all.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// Local input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading a local file or stdin failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for FolioError {
    fn from(err: reqwest::Error) -> Self {
        FolioError::Network(err.to_string())
    }
}

/// Result type alias for FolioError.
pub type Result<T> = std::result::Result<T, FolioError>;
