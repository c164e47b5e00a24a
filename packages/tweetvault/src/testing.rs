//! Testing utilities including mock implementations.
//!
//! These are useful for exercising the pipeline without making real AI or
//! network calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{ClassifyError, ClassifyResult, SourceResult};
use crate::traits::{ai::AI, source::BookmarkSource};
use crate::types::bookmark::Bookmark;
use crate::types::fetch::{FetchOptions, FetchResult};

/// A mock AI backend that replays queued replies.
///
/// Replies are consumed in order; once the queue is empty the default reply (if any)
/// is returned for every further call. Clones share state, so a test can keep a handle
/// for assertions after moving one into a classifier.
#[derive(Clone, Default)]
pub struct MockAI {
    /// Replies returned in order
    replies: Arc<RwLock<VecDeque<String>>>,

    /// Returned once the queue is drained
    default_reply: Option<String>,

    /// Reported default batch size
    batch_size: Option<usize>,

    /// Call tracking for assertions
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.write().unwrap().push_back(reply.into());
        self
    }

    /// Reply used after the queue is drained.
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = Some(reply.into());
        self
    }

    /// Override the reported default batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Every prompt received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.prompts.write().unwrap().clear();
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, prompt: &str) -> ClassifyResult<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        let queued = self.replies.write().unwrap().pop_front();
        queued
            .or_else(|| self.default_reply.clone())
            .ok_or_else(|| ClassifyError::AI("MockAI has no reply queued".into()))
    }

    fn default_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(20)
    }
}

/// A mock source that serves scripted pages in order, ignoring the cursor.
///
/// Once the script runs out every fetch returns an empty final page.
#[derive(Clone, Default)]
pub struct MockSource {
    pages: Arc<RwLock<VecDeque<FetchResult>>>,
    requests: Arc<RwLock<Vec<FetchOptions>>>,
    page_size: Option<usize>,
    default_limit: Option<usize>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next page.
    pub fn with_page(self, bookmarks: Vec<Bookmark>, cursor: Option<&str>) -> Self {
        self.pages
            .write()
            .unwrap()
            .push_back(FetchResult::new(bookmarks, cursor.map(str::to_string)));
        self
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<FetchOptions> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl BookmarkSource for MockSource {
    async fn fetch(&self, options: FetchOptions) -> SourceResult<FetchResult> {
        self.requests.write().unwrap().push(options);
        Ok(self.pages.write().unwrap().pop_front().unwrap_or_default())
    }

    fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    fn default_limit(&self) -> Option<usize> {
        self.default_limit
    }
}
