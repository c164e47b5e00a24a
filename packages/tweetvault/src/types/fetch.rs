//! Source request and response types.

use super::bookmark::Bookmark;

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

impl FetchOptions {
    pub fn new(limit: Option<usize>, cursor: Option<String>) -> Self {
        Self { limit, cursor }
    }
}

/// One page of bookmarks.
///
/// `has_more` is true exactly when `cursor` is present and non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchResult {
    pub bookmarks: Vec<Bookmark>,
    pub cursor: Option<String>,
    pub has_more: bool,
}

impl FetchResult {
    pub fn new(bookmarks: Vec<Bookmark>, cursor: Option<String>) -> Self {
        let cursor = cursor.filter(|c| !c.is_empty());
        Self {
            bookmarks,
            has_more: cursor.is_some(),
            cursor,
        }
    }
}
