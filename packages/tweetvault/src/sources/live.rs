//! Live fetch source backed by the X web GraphQL API.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use x_client::{QueryIdResolver, XClient};

use crate::error::SourceResult;
use crate::traits::source::BookmarkSource;
use crate::types::bookmark::Bookmark;
use crate::types::fetch::{FetchOptions, FetchResult};

/// Items per GraphQL request.
pub const LIVE_PAGE_SIZE: usize = 20;

/// Records collected when the caller sets no limit.
pub const LIVE_DEFAULT_LIMIT: usize = 100;

/// Fetches the signed-in user's bookmarks, one GraphQL page per `fetch`.
pub struct LiveFetcher {
    client: XClient,
    resolver: Arc<QueryIdResolver>,
}

impl LiveFetcher {
    /// Build from a browser cookie string. Fails fast when the cookie has no `ct0`.
    pub fn new(cookie: impl Into<String>, resolver: Arc<QueryIdResolver>) -> SourceResult<Self> {
        Ok(Self {
            client: XClient::new(cookie)?,
            resolver,
        })
    }

    /// Use a preconfigured client (custom base URL, HTTP client).
    pub fn with_client(client: XClient, resolver: Arc<QueryIdResolver>) -> Self {
        Self { client, resolver }
    }
}

#[async_trait]
impl BookmarkSource for LiveFetcher {
    async fn fetch(&self, options: FetchOptions) -> SourceResult<FetchResult> {
        let query_id = self.resolver.resolve().await;
        let count = options.limit.unwrap_or(LIVE_PAGE_SIZE);

        let page = self
            .client
            .bookmarks_page(&query_id, count, options.cursor.as_deref())
            .await?;

        let bookmarks: Vec<Bookmark> = page.tweets.into_iter().map(Bookmark::from).collect();
        debug!(count = bookmarks.len(), "Normalized live bookmarks");

        Ok(FetchResult::new(bookmarks, page.cursor))
    }

    fn page_size(&self) -> Option<usize> {
        Some(LIVE_PAGE_SIZE)
    }

    fn default_limit(&self) -> Option<usize> {
        Some(LIVE_DEFAULT_LIMIT)
    }
}
