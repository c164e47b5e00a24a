//! File import source.
//!
//! Accepts every export shape we have seen in the wild: the flat "simplified" form,
//! the vendor-native form nested under `tweet`, and this tool's own camelCase output.
//! Each field is read through an ordered list of JSON pointers; the first one that
//! resolves wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{SourceError, SourceResult};
use crate::traits::source::BookmarkSource;
use crate::types::bookmark::{permalink, Bookmark, MediaItem, MediaType, Metrics};
use crate::types::fetch::{FetchOptions, FetchResult};

const ID_PATHS: &[&str] = &["/id", "/id_str", "/rest_id"];
const TEXT_PATHS: &[&str] = &["/full_text", "/text"];
const AUTHOR_NAME_PATHS: &[&str] = &["/user/name", "/author_name", "/authorName"];
const AUTHOR_HANDLE_PATHS: &[&str] = &["/user/screen_name", "/author_handle", "/authorHandle"];
const CREATED_AT_PATHS: &[&str] = &["/created_at", "/createdAt"];
const VENDOR_MEDIA_PATHS: &[&str] = &["/extended_entities/media", "/entities/media"];
const QUOTED_PATHS: &[&str] = &["/quotedTweet", "/quoted_status"];

/// Reads bookmarks from a JSON export file.
///
/// The file is read and normalized once per importer; later `fetch` calls page over
/// the cached list using a decimal offset as the cursor.
pub struct JsonImporter {
    path: PathBuf,
    bookmarks: OnceCell<Vec<Bookmark>>,
}

impl JsonImporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bookmarks: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> SourceResult<&[Bookmark]> {
        let bookmarks = self
            .bookmarks
            .get_or_try_init(|| async {
                let raw = tokio::fs::read_to_string(&self.path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: self.path.clone(),
                        source,
                    })?;
                let document: Value =
                    serde_json::from_str(&raw).map_err(|source| SourceError::Json {
                        path: self.path.clone(),
                        source,
                    })?;

                let bookmarks = parse_document(&document);
                info!(
                    path = %self.path.display(),
                    count = bookmarks.len(),
                    "Imported bookmarks"
                );
                Ok::<_, SourceError>(bookmarks)
            })
            .await?;

        Ok(bookmarks.as_slice())
    }
}

#[async_trait]
impl BookmarkSource for JsonImporter {
    async fn fetch(&self, options: FetchOptions) -> SourceResult<FetchResult> {
        let all = self.load().await?;
        let total = all.len();

        let offset = match options.cursor.as_deref() {
            None | Some("") => 0,
            Some(cursor) => cursor
                .trim()
                .parse::<usize>()
                .map_err(|_| SourceError::InvalidCursor {
                    cursor: cursor.to_string(),
                })?,
        };
        let limit = options.limit.unwrap_or(total);

        let start = offset.min(total);
        let end = offset.saturating_add(limit).min(total);
        let next = offset.saturating_add(limit);
        let cursor = (next < total).then(|| next.to_string());

        Ok(FetchResult::new(all[start..end].to_vec(), cursor))
    }
}

/// Normalize a whole import document.
///
/// A top-level array or an object with a `bookmarks` array; anything else is empty.
pub fn parse_document(document: &Value) -> Vec<Bookmark> {
    let elements = match document {
        Value::Array(items) => items.as_slice(),
        other => other
            .get("bookmarks")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
    };

    elements
        .iter()
        .filter_map(|raw| {
            let bookmark = normalize_bookmark(raw);
            if bookmark.is_none() {
                debug!("Dropping import element without an id");
            }
            bookmark
        })
        .collect()
}

/// Normalize one element into a [`Bookmark`]. `None` when no id resolves.
pub fn normalize_bookmark(raw: &Value) -> Option<Bookmark> {
    let tweet = raw.get("tweet").filter(|t| t.is_object()).unwrap_or(raw);

    let id = first_scalar(tweet, ID_PATHS)?;
    if id.is_empty() {
        return None;
    }

    let author_handle = first_scalar(tweet, AUTHOR_HANDLE_PATHS).unwrap_or_default();
    let url = tweet
        .get("url")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| permalink(&author_handle, &id));

    Some(Bookmark {
        text: first_scalar(tweet, TEXT_PATHS).unwrap_or_default(),
        author_name: first_scalar(tweet, AUTHOR_NAME_PATHS).unwrap_or_default(),
        created_at: first_scalar(tweet, CREATED_AT_PATHS).unwrap_or_default(),
        media: parse_media(tweet),
        metrics: parse_metrics(tweet),
        quoted_tweet: QUOTED_PATHS
            .iter()
            .find_map(|p| tweet.pointer(p))
            .and_then(normalize_bookmark)
            .map(Box::new),
        id,
        author_handle,
        url,
    })
}

fn parse_media(tweet: &Value) -> Vec<MediaItem> {
    if let Some(media) = VENDOR_MEDIA_PATHS
        .iter()
        .find_map(|p| tweet.pointer(p).and_then(Value::as_array))
    {
        return media
            .iter()
            .map(|m| MediaItem {
                kind: MediaType::from_vendor(m.get("type").and_then(Value::as_str).unwrap_or("")),
                url: first_scalar(m, &["/media_url_https", "/url"]).unwrap_or_default(),
                alt_text: first_scalar(m, &["/ext_alt_text"]).filter(|a| !a.is_empty()),
            })
            .collect();
    }

    tweet
        .get("media")
        .and_then(Value::as_array)
        .map(|media| {
            media
                .iter()
                .map(|m| MediaItem {
                    kind: MediaType::from_vendor(
                        m.get("type").and_then(Value::as_str).unwrap_or(""),
                    ),
                    url: first_scalar(m, &["/url"]).unwrap_or_default(),
                    alt_text: first_scalar(m, &["/altText", "/alt_text"])
                        .filter(|a| !a.is_empty()),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_metrics(tweet: &Value) -> Option<Metrics> {
    if tweet.get("favorite_count").is_some_and(|v| !v.is_null()) {
        return Some(Metrics {
            likes: count_at(tweet, "/favorite_count").unwrap_or(0),
            retweets: count_at(tweet, "/retweet_count").unwrap_or(0),
            replies: count_at(tweet, "/reply_count").unwrap_or(0),
            views: count_at(tweet, "/views/count").or_else(|| count_at(tweet, "/views")),
        });
    }

    let metrics = tweet.get("metrics").filter(|m| m.is_object())?;
    Some(Metrics {
        likes: count_at(metrics, "/likes").unwrap_or(0),
        retweets: count_at(metrics, "/retweets").unwrap_or(0),
        replies: count_at(metrics, "/replies").unwrap_or(0),
        views: count_at(metrics, "/views"),
    })
}

/// First pointer that resolves to a string or a number, rendered as a string.
fn first_scalar(value: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|p| match value.pointer(p)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn count_at(value: &Value, path: &str) -> Option<u64> {
    match value.pointer(path)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_flat_shape() {
        let raw = json!({ "id": "1", "full_text": "hello", "user": { "screen_name": "a", "name": "Alice" } });
        let bookmark = normalize_bookmark(&raw).unwrap();
        assert_eq!(bookmark.id, "1");
        assert_eq!(bookmark.text, "hello");
        assert_eq!(bookmark.author_handle, "a");
        assert_eq!(bookmark.author_name, "Alice");
        assert_eq!(bookmark.url, "https://x.com/a/status/1");
        assert!(bookmark.metrics.is_none());
    }

    #[test]
    fn test_vendor_shape_nested_under_tweet() {
        let raw = json!({ "tweet": {
            "id_str": "1234567890123456789",
            "full_text": "vendor text",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "favorite_count": "7",
            "retweet_count": 2,
            "views": { "count": "100" },
            "extended_entities": { "media": [
                { "type": "animated_gif", "media_url_https": "https://pbs.twimg.com/g.jpg" },
                { "type": "photo", "url": "https://t.co/x", "ext_alt_text": "chart" }
            ] }
        } });

        let bookmark = normalize_bookmark(&raw).unwrap();
        assert_eq!(bookmark.id, "1234567890123456789");
        assert_eq!(bookmark.url, "https://x.com/i/status/1234567890123456789");
        assert_eq!(
            bookmark.metrics,
            Some(Metrics { likes: 7, retweets: 2, replies: 0, views: Some(100) })
        );
        assert_eq!(bookmark.media[0].kind, MediaType::Gif);
        assert_eq!(bookmark.media[1].url, "https://t.co/x");
        assert_eq!(bookmark.media[1].alt_text.as_deref(), Some("chart"));
    }

    #[test]
    fn test_own_output_round_trips() {
        let mut original = Bookmark::new("9", "rust", "reimport me");
        original.author_name = "Rust".into();
        original.created_at = "2024-01-02T03:04:05Z".into();
        original.media.push(MediaItem {
            kind: MediaType::Video,
            url: "https://video".into(),
            alt_text: None,
        });
        original.metrics = Some(Metrics { likes: 1, retweets: 2, replies: 3, views: None });
        original.quoted_tweet = Some(Box::new(Bookmark::new("8", "inner", "quoted")));

        let value = serde_json::to_value(&original).unwrap();
        assert_eq!(normalize_bookmark(&value).unwrap(), original);
    }

    #[test]
    fn test_numeric_id_and_precedence() {
        let raw = json!({ "id": 42, "id_str": "ignored", "text": "t", "author_handle": "h" });
        let bookmark = normalize_bookmark(&raw).unwrap();
        assert_eq!(bookmark.id, "42");
        assert_eq!(bookmark.author_handle, "h");
    }

    #[test]
    fn test_quoted_status_alias() {
        let raw = json!({ "id": "1", "quoted_status": { "id_str": "2", "full_text": "q" } });
        let quoted = normalize_bookmark(&raw).unwrap().quoted_tweet.unwrap();
        assert_eq!(quoted.id, "2");
        assert_eq!(quoted.text, "q");
    }

    #[test]
    fn test_document_shapes() {
        assert_eq!(parse_document(&json!([{ "id": "1" }])).len(), 1);
        assert_eq!(parse_document(&json!({ "bookmarks": [{ "id": "1" }, { "id": "" }, {}] })).len(), 1);
        assert!(parse_document(&json!({ "data": [] })).is_empty());
        assert!(parse_document(&json!("nope")).is_empty());
    }

    fn importer_with(document: Value) -> (tempfile::NamedTempFile, JsonImporter) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", document).unwrap();
        let importer = JsonImporter::new(file.path());
        (file, importer)
    }

    #[tokio::test]
    async fn test_offset_pagination() {
        let items: Vec<_> = (1..=5).map(|i| json!({ "id": i.to_string() })).collect();
        let (_file, importer) = importer_with(json!(items));

        let first = importer.fetch(FetchOptions::new(Some(2), None)).await.unwrap();
        assert_eq!(first.bookmarks.len(), 2);
        assert_eq!(first.cursor.as_deref(), Some("2"));
        assert!(first.has_more);

        let last = importer
            .fetch(FetchOptions::new(Some(2), Some("4".into())))
            .await
            .unwrap();
        assert_eq!(last.bookmarks.len(), 1);
        assert_eq!(last.bookmarks[0].id, "5");
        assert!(!last.has_more);

        let everything = importer.fetch(FetchOptions::default()).await.unwrap();
        assert_eq!(everything.bookmarks.len(), 5);
        assert!(everything.cursor.is_none());
    }

    #[tokio::test]
    async fn test_file_is_read_once() {
        let (file, importer) = importer_with(json!([{ "id": "1" }]));
        importer.fetch(FetchOptions::default()).await.unwrap();

        std::fs::write(file.path(), "not json any more").unwrap();
        let again = importer.fetch(FetchOptions::default()).await.unwrap();
        assert_eq!(again.bookmarks.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_cursor() {
        let (_file, importer) = importer_with(json!([]));
        let err = importer
            .fetch(FetchOptions::new(None, Some("abc".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidCursor { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let importer = JsonImporter::new("/definitely/not/here.json");
        let err = importer.fetch(FetchOptions::default()).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
