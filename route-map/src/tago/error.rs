//! TAGO client error types.

use crate::config::ConfigError;

/// Errors from the TAGO API client.
///
/// Every variant means the upstream call failed. A legitimately empty
/// result ("no data") is never an error.
#[derive(Debug, thiserror::Error)]
pub enum TagoError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("HTTP status {status}: {message}")]
    Status { status: u16, message: String },

    /// API answered with a failure result code
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client cannot be built from the given configuration
    #[error("not configured: {0}")]
    NotConfigured(#[from] ConfigError),

    /// Recorded fixture data could not be read
    #[error("mock data error: {0}")]
    Fixture(String),
}
