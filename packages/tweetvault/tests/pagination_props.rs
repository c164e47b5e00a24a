//! Property tests for the shared pagination loop.

use async_trait::async_trait;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tweetvault::error::SourceResult;
use tweetvault::{collect_bookmarks, Bookmark, BookmarkSource, FetchOptions, FetchResult};

/// Serves `total` records with an offset cursor, honoring the requested page size.
struct CountingSource {
    total: usize,
    page_size: usize,
    requests: AtomicUsize,
}

#[async_trait]
impl BookmarkSource for CountingSource {
    async fn fetch(&self, options: FetchOptions) -> SourceResult<FetchResult> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let offset: usize = options.cursor.as_deref().map_or(0, |c| c.parse().unwrap());
        let limit = options.limit.unwrap_or(self.total);
        let end = (offset + limit).min(self.total);

        let bookmarks = (offset.min(end)..end)
            .map(|i| Bookmark::new(i.to_string(), "p", "x"))
            .collect();
        let cursor = (offset + limit < self.total).then(|| (offset + limit).to_string());
        Ok(FetchResult::new(bookmarks, cursor))
    }

    fn page_size(&self) -> Option<usize> {
        Some(self.page_size)
    }
}

proptest! {
    #[test]
    fn prop_never_exceeds_limit_and_bounds_requests(
        total in 0usize..120,
        page_size in 1usize..25,
        limit in 0usize..80,
    ) {
        let source = CountingSource { total, page_size, requests: AtomicUsize::new(0) };
        let collected = tokio_test::block_on(collect_bookmarks(&source, Some(limit), |_| {})).unwrap();
        let requests = source.requests.load(Ordering::SeqCst);

        prop_assert_eq!(collected.len(), limit.min(total));
        if limit == 0 {
            prop_assert_eq!(requests, 0);
        } else {
            prop_assert!(requests <= limit.div_ceil(page_size));
        }

        let ids: Vec<String> = collected.iter().map(|b| b.id.clone()).collect();
        let expected: Vec<String> = (0..limit.min(total)).map(|i| i.to_string()).collect();
        prop_assert_eq!(ids, expected);
    }
}
