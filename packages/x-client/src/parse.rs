//! Bookmarks timeline response parser.
//!
//! The vendor response is a deeply nested instruction list whose layout drifts between
//! releases and experiment cohorts. Every field is read through an ordered list of JSON
//! pointers; the first pointer that resolves wins. A tweet entry that cannot be read is
//! skipped, never the whole page.

use serde_json::Value;
use tracing::debug;

use crate::types::{BookmarksPage, MediaType, Tweet, TweetMedia, TweetMetrics};

/// Known locations of the instruction list, newest layout first.
const INSTRUCTION_PATHS: &[&str] = &[
    "/data/bookmark_timeline_v2/timeline/instructions",
    "/data/search_by_raw_query/bookmarks_search_timeline/timeline/instructions",
];

/// User identity moved from `legacy` to `core` in 2025; `core` takes precedence.
const SCREEN_NAME_PATHS: &[&str] = &[
    "/core/user_results/result/core/screen_name",
    "/core/user_results/result/legacy/screen_name",
];

const NAME_PATHS: &[&str] = &[
    "/core/user_results/result/core/name",
    "/core/user_results/result/legacy/name",
];

const TEXT_PATHS: &[&str] = &[
    "/note_tweet/note_tweet_results/result/text",
    "/legacy/full_text",
];

const TWEET_ENTRY_PREFIX: &str = "tweet-";
const BOTTOM_CURSOR_PREFIX: &str = "cursor-bottom-";

/// Parse a full Bookmarks GraphQL response body.
///
/// A response without any recognised instruction list is an empty page.
pub fn parse_bookmarks_response(json: &Value) -> BookmarksPage {
    let Some(instructions) = INSTRUCTION_PATHS
        .iter()
        .find_map(|path| json.pointer(path).and_then(Value::as_array))
    else {
        debug!("No instruction list in bookmarks response");
        return BookmarksPage::default();
    };

    let entries = instructions
        .iter()
        .find(|i| i.get("type").and_then(Value::as_str) == Some("TimelineAddEntries"))
        .and_then(|i| i.get("entries"))
        .and_then(Value::as_array);

    let mut page = BookmarksPage::default();
    for entry in entries.into_iter().flatten() {
        let entry_id = entry.get("entryId").and_then(Value::as_str).unwrap_or("");

        if entry_id.starts_with(TWEET_ENTRY_PREFIX) {
            let tweet = entry
                .pointer("/content/itemContent/tweet_results/result")
                .and_then(parse_tweet_result);
            match tweet {
                Some(tweet) => page.tweets.push(tweet),
                None => debug!(entry_id, "Skipping unparsable tweet entry"),
            }
        } else if entry_id.starts_with(BOTTOM_CURSOR_PREFIX) {
            page.cursor = entry
                .pointer("/content/value")
                .and_then(Value::as_str)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
        }
    }

    page
}

/// Parse one `tweet_results.result` object, unwrapping the visibility wrapper.
pub fn parse_tweet_result(result: &Value) -> Option<Tweet> {
    let tweet = if result.get("__typename").and_then(Value::as_str)
        == Some("TweetWithVisibilityResults")
    {
        result.get("tweet")?
    } else {
        result
    };

    let legacy = tweet.get("legacy")?;
    let rest_id = first_str(tweet, &["/rest_id", "/legacy/id_str"])?;
    if rest_id.is_empty() {
        return None;
    }

    let quoted = tweet
        .pointer("/quoted_status_result/result")
        .and_then(parse_tweet_result)
        .map(Box::new);

    Some(Tweet {
        rest_id: rest_id.to_string(),
        text: first_str(tweet, TEXT_PATHS).unwrap_or_default().to_string(),
        author_name: first_str(tweet, NAME_PATHS).unwrap_or_default().to_string(),
        screen_name: first_str(tweet, SCREEN_NAME_PATHS)
            .unwrap_or_default()
            .to_string(),
        created_at: str_at(legacy, "/created_at").unwrap_or_default().to_string(),
        media: parse_media(legacy),
        metrics: TweetMetrics {
            likes: count_at(legacy, "/favorite_count").unwrap_or(0),
            retweets: count_at(legacy, "/retweet_count").unwrap_or(0),
            replies: count_at(legacy, "/reply_count").unwrap_or(0),
            views: count_at(tweet, "/views/count"),
        },
        quoted,
    })
}

fn parse_media(legacy: &Value) -> Vec<TweetMedia> {
    let Some(media) = legacy
        .pointer("/extended_entities/media")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    media
        .iter()
        .map(|m| TweetMedia {
            kind: MediaType::from_vendor(str_at(m, "/type").unwrap_or("photo")),
            url: str_at(m, "/media_url_https").unwrap_or_default().to_string(),
            alt_text: str_at(m, "/ext_alt_text")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
        .collect()
}

/// First pointer in `paths` that resolves to a string.
pub fn first_str<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a str> {
    paths.iter().find_map(|p| str_at(value, p))
}

fn str_at<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    value.pointer(path).and_then(Value::as_str)
}

/// Counters arrive as numbers in `legacy` but as decimal strings under `views`.
fn count_at(value: &Value, path: &str) -> Option<u64> {
    match value.pointer(path)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
