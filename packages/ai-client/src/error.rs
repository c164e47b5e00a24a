//! Error types for the AI client.

use thiserror::Error;

/// Result type for AI client operations.
pub type Result<T> = std::result::Result<T, AiError>;

/// AI client errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Configuration error (missing API key, unknown provider without base URL)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the provider
    #[error("{provider} API error {status}: {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("parse error: {0}")]
    Parse(String),
}
