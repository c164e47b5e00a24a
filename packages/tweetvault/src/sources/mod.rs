//! Bookmark source implementations and the shared pagination loop.

pub mod json_import;
pub mod live;

pub use json_import::JsonImporter;
pub use live::LiveFetcher;

use tracing::debug;

use crate::error::SourceResult;
use crate::traits::source::BookmarkSource;
use crate::types::{bookmark::Bookmark, fetch::FetchOptions};

/// Progress of [`collect_bookmarks`] after each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based page number
    pub page: usize,
    /// Records in this page (after truncation)
    pub fetched: usize,
    /// Records collected so far
    pub total: usize,
}

/// Drain a source page by page.
///
/// Requests `min(page_size, remaining)` per page and stops once `limit` records are
/// collected, the last page carried no cursor, or the last page was empty. Never returns
/// more than `limit` records; an oversized page is truncated. `limit` falls back to the
/// source's default.
pub async fn collect_bookmarks<S, F>(
    source: &S,
    limit: Option<usize>,
    mut on_page: F,
) -> SourceResult<Vec<Bookmark>>
where
    S: BookmarkSource + ?Sized,
    F: FnMut(PageProgress),
{
    let limit = limit.or_else(|| source.default_limit());
    let page_size = source.page_size();

    let mut collected: Vec<Bookmark> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page = 0;

    loop {
        let remaining = limit.map(|l| l.saturating_sub(collected.len()));
        if remaining == Some(0) {
            break;
        }

        let request = match (page_size, remaining) {
            (Some(size), Some(remaining)) => Some(size.min(remaining)),
            (Some(size), None) => Some(size),
            (None, remaining) => remaining,
        };

        page += 1;
        debug!(page, request = ?request, cursor = ?cursor, "Fetching bookmark page");
        let result = source
            .fetch(FetchOptions::new(request, cursor.take()))
            .await?;

        let mut bookmarks = result.bookmarks;
        let received = bookmarks.len();
        if let Some(remaining) = remaining {
            bookmarks.truncate(remaining);
        }
        let fetched = bookmarks.len();
        collected.extend(bookmarks);

        on_page(PageProgress {
            page,
            fetched,
            total: collected.len(),
        });

        if received == 0 || !result.has_more {
            break;
        }
        cursor = result.cursor;
    }

    Ok(collected)
}
