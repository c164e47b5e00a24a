//! AI trait for classification calls.

use async_trait::async_trait;

use crate::error::ClassifyResult;

/// A text-in, text-out model backend.
///
/// Implementations wrap a specific provider and handle its wire format; the classifier
/// owns prompting and reply parsing.
#[async_trait]
pub trait AI: Send + Sync {
    /// Send one prompt and return the raw reply text.
    async fn complete(&self, prompt: &str) -> ClassifyResult<String>;

    /// Bookmarks per request when the caller does not choose.
    fn default_batch_size(&self) -> usize {
        20
    }
}
