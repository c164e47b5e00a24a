//! Typed errors for each pipeline stage.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Each stage has its own enum;
//! the orchestrator wraps them unchanged in [`SyncError`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while acquiring bookmarks.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Import file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Import file is not valid JSON
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File import cursors are decimal offsets
    #[error("invalid cursor: {cursor}")]
    InvalidCursor { cursor: String },

    /// Live fetch failed
    #[error(transparent)]
    X(#[from] x_client::XError),
}

/// Errors raised by the classifier.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Reply contained no `{...}` span
    #[error("failed to parse AI response as JSON: no JSON object in reply")]
    NoJsonObject,

    /// The `{...}` span did not decode
    #[error("failed to parse AI response as JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Backend call failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised while writing the vault.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the sync orchestrator.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid configuration, detected before any I/O
    #[error("config error: {0}")]
    Config(String),

    /// The source produced nothing to classify
    #[error("no bookmarks found")]
    NoBookmarks,

    #[error("fetch failed: {0}")]
    Fetch(#[from] SourceError),

    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("vault generation failed: {0}")]
    Generate(#[from] VaultError),
}

impl From<ai_client::AiError> for ClassifyError {
    fn from(err: ai_client::AiError) -> Self {
        Self::AI(Box::new(err))
    }
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
pub type ClassifyResult<T> = std::result::Result<T, ClassifyError>;
pub type VaultResult<T> = std::result::Result<T, VaultError>;
pub type Result<T> = std::result::Result<T, SyncError>;
