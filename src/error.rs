//! Error types for dataset-dl
//!
//! One crate-wide [`Error`] enum with a dedicated sub-enum for archive
//! extraction failures. Every failure is fatal to the run: the fetcher
//! propagates the first error it hits and performs no retries.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dataset-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dataset-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "download_path")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error (connection, TLS, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("HTTP status {status} fetching '{url}'")]
    HttpStatus {
        /// URL of the failed request
        url: String,
        /// Status code returned by the server
        status: reqwest::StatusCode,
    },

    /// Archive extraction error
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),
}

/// Archive extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The saved file is not a readable zip archive
    #[error("'{}' is not a readable zip archive: {reason}", .archive.display())]
    InvalidArchive {
        /// Path of the archive that failed to open
        archive: PathBuf,
        /// Underlying zip error text
        reason: String,
    },

    /// An entry inside the archive could not be extracted
    #[error("failed to extract '{}': {reason}", .archive.display())]
    ExtractionFailed {
        /// Path of the archive being extracted
        archive: PathBuf,
        /// Underlying error text
        reason: String,
    },
}

impl Error {
    /// Convenience constructor for configuration errors
    pub fn config(message: impl Into<String>, key: Option<&str>) -> Self {
        Error::Config {
            message: message.into(),
            key: key.map(str::to_string),
        }
    }
}
