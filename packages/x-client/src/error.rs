//! Error types for the X client.

use thiserror::Error;

/// Result type for X client operations.
pub type Result<T> = std::result::Result<T, XError>;

/// X client errors.
#[derive(Debug, Error)]
pub enum XError {
    /// The cookie string has no `ct0` field, so no CSRF header can be sent.
    #[error(
        "invalid cookie: missing ct0 (CSRF token). Copy the full cookie string from your browser"
    )]
    MissingCsrfToken,

    /// Non-2xx response from the GraphQL endpoint
    #[error("X API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Connection failed, timeout, body read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not JSON
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
