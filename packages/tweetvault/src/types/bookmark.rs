//! The canonical bookmark record.
//!
//! Serialized with camelCase keys so that the output of `fetch` can be fed back
//! into the file importer.

use serde::{Deserialize, Serialize};

pub use x_client::MediaType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
}

/// A saved post. `id` is never empty once a record leaves a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub text: String,
    pub author_name: String,
    pub author_handle: String,
    /// Timestamp string exactly as the source reported it
    pub created_at: String,
    pub url: String,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    /// Display only; never classified on its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_tweet: Option<Box<Bookmark>>,
}

impl Bookmark {
    /// Minimal record, mostly for tests and fixtures.
    pub fn new(id: impl Into<String>, handle: impl Into<String>, text: impl Into<String>) -> Self {
        let id = id.into();
        let author_handle = handle.into();
        let url = permalink(&author_handle, &id);
        Self {
            id,
            text: text.into(),
            author_name: String::new(),
            author_handle,
            created_at: String::new(),
            url,
            media: Vec::new(),
            metrics: None,
            quoted_tweet: None,
        }
    }
}

/// `https://x.com/<handle>/status/<id>`, or the handle-less `/i/status/` form.
pub fn permalink(handle: &str, id: &str) -> String {
    if handle.is_empty() {
        format!("https://x.com/i/status/{}", id)
    } else {
        format!("https://x.com/{}/status/{}", handle, id)
    }
}

impl From<x_client::Tweet> for Bookmark {
    fn from(tweet: x_client::Tweet) -> Self {
        let url = tweet.permalink();
        let x_client::Tweet {
            rest_id,
            text,
            author_name,
            screen_name,
            created_at,
            media,
            metrics,
            quoted,
        } = tweet;

        Self {
            id: rest_id,
            text,
            author_name,
            author_handle: screen_name,
            created_at,
            url,
            media: media
                .into_iter()
                .map(|m| MediaItem {
                    kind: m.kind,
                    url: m.url,
                    alt_text: m.alt_text,
                })
                .collect(),
            metrics: Some(Metrics {
                likes: metrics.likes,
                retweets: metrics.retweets,
                replies: metrics.replies,
                views: metrics.views,
            }),
            quoted_tweet: quoted.map(|q| Box::new(Bookmark::from(*q))),
        }
    }
}
