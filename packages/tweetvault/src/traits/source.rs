//! Bookmark source trait.
//!
//! Two variants ship with the crate: [`JsonImporter`](crate::sources::JsonImporter) reads
//! an export file, [`LiveFetcher`](crate::sources::LiveFetcher) scrapes the live timeline.

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::fetch::{FetchOptions, FetchResult};

#[async_trait]
pub trait BookmarkSource: Send + Sync {
    /// Fetch one page of bookmarks starting at `options.cursor`.
    async fn fetch(&self, options: FetchOptions) -> SourceResult<FetchResult>;

    /// Items per page when paginating. `None` means everything in one request.
    fn page_size(&self) -> Option<usize> {
        None
    }

    /// Records collected when the caller sets no limit. `None` means no limit.
    fn default_limit(&self) -> Option<usize> {
        None
    }
}
