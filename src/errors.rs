/*!
 * Error types for the srtsmith application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the translation endpoint
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when sending the request itself fails
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// No candidate model answered the connectivity probe
    #[error("None of the {0} candidate model(s) answered the connectivity probe")]
    NoUsableModel(usize),
}

/// Errors that can occur while reading or writing subtitle files.
///
/// Parsing itself never fails - blocks that cannot be decomposed degrade
/// to pass-through - so the variants here cover only the file boundary.
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Input file could not be read
    #[error("Failed to read subtitle file: {0}")]
    ReadFailed(String),

    /// Output file could not be written
    #[error("Failed to write subtitle file: {0}")]
    WriteFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the translation endpoint
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle file handling
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
