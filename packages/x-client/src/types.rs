use serde::{Deserialize, Serialize};

/// `variables` query parameter of the Bookmarks operation.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarksVariables {
    pub count: usize,
    #[serde(rename = "includePromotedContent")]
    pub include_promoted_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// `features` query parameter. The server rejects requests missing any of these flags.
#[derive(Debug, Clone, Serialize)]
pub struct Features {
    pub graphql_timeline_v2_bookmark_timeline: bool,
    pub responsive_web_graphql_exclude_directive_enabled: bool,
    pub verified_phone_label_enabled: bool,
    pub responsive_web_graphql_timeline_navigation_enabled: bool,
    pub responsive_web_graphql_skip_user_profile_image_extensions_enabled: bool,
    pub creator_subscriptions_tweet_preview_api_enabled: bool,
    pub communities_web_enable_tweet_community_results_fetch: bool,
    pub c9s_tweet_anatomy_moderator_badge_enabled: bool,
    pub tweetypie_unmention_optimization_enabled: bool,
    pub responsive_web_edit_tweet_api_enabled: bool,
    pub longform_notetweets_consumption_enabled: bool,
    pub responsive_web_media_download_video_enabled: bool,
    pub responsive_web_enhance_cards_enabled: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            graphql_timeline_v2_bookmark_timeline: true,
            responsive_web_graphql_exclude_directive_enabled: true,
            verified_phone_label_enabled: false,
            responsive_web_graphql_timeline_navigation_enabled: true,
            responsive_web_graphql_skip_user_profile_image_extensions_enabled: false,
            creator_subscriptions_tweet_preview_api_enabled: true,
            communities_web_enable_tweet_community_results_fetch: true,
            c9s_tweet_anatomy_moderator_badge_enabled: true,
            tweetypie_unmention_optimization_enabled: true,
            responsive_web_edit_tweet_api_enabled: true,
            longform_notetweets_consumption_enabled: true,
            responsive_web_media_download_video_enabled: false,
            responsive_web_enhance_cards_enabled: false,
        }
    }
}

/// Kind of attached media, collapsed from the vendor's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
    Gif,
}

impl MediaType {
    /// Map a vendor media type (`photo`, `video`, `animated_gif`). Anything unknown is a photo.
    pub fn from_vendor(kind: &str) -> Self {
        match kind {
            "video" => Self::Video,
            "animated_gif" | "gif" => Self::Gif,
            _ => Self::Photo,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TweetMedia {
    pub kind: MediaType,
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweetMetrics {
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub views: Option<u64>,
}

/// A single bookmarked tweet parsed out of the timeline response.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    pub rest_id: String,
    pub text: String,
    pub author_name: String,
    pub screen_name: String,
    pub created_at: String,
    pub media: Vec<TweetMedia>,
    pub metrics: TweetMetrics,
    pub quoted: Option<Box<Tweet>>,
}

impl Tweet {
    /// Canonical permalink. Falls back to the handle-less `/i/status/` form.
    pub fn permalink(&self) -> String {
        if self.screen_name.is_empty() {
            format!("https://x.com/i/status/{}", self.rest_id)
        } else {
            format!("https://x.com/{}/status/{}", self.screen_name, self.rest_id)
        }
    }
}

/// One page of the Bookmarks timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarksPage {
    pub tweets: Vec<Tweet>,
    /// Bottom cursor; `None` when the page carried no (or an empty) cursor entry.
    pub cursor: Option<String>,
}
