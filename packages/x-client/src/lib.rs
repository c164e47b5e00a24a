//! Pure X (Twitter) web GraphQL client.
//!
//! Talks to the same internal GraphQL endpoint the x.com web app uses, authenticated with
//! a browser session cookie. Only the Bookmarks timeline is supported.
//!
//! # Example
//!
//! ```rust,ignore
//! use x_client::{QueryIdResolver, XClient};
//!
//! let client = XClient::new(cookie)?;
//! let query_id = QueryIdResolver::new().resolve().await;
//!
//! let page = client.bookmarks_page(&query_id, 20, None).await?;
//! for tweet in &page.tweets {
//!     println!("@{}: {}", tweet.screen_name, tweet.text);
//! }
//! ```

pub mod error;
pub mod parse;
pub mod resolver;
pub mod types;

pub use error::{Result, XError};
pub use parse::parse_bookmarks_response;
pub use resolver::{QueryIdResolver, FALLBACK_QUERY_ID};
pub use types::{BookmarksPage, MediaType, Tweet, TweetMedia, TweetMetrics};

use once_cell::sync::Lazy;
use regex::Regex;
use types::{BookmarksVariables, Features};

const BASE_URL: &str = "https://x.com";

/// Public bearer token baked into the x.com web client.
const BEARER_TOKEN: &str =
    "AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Error bodies are cut to this many characters.
const ERROR_BODY_LIMIT: usize = 200;

static CSRF_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ct0=([^;]+)").expect("ct0 pattern is valid"));

/// Extract the `ct0` CSRF token from a browser cookie string.
pub fn csrf_token(cookie: &str) -> Option<&str> {
    CSRF_TOKEN
        .captures(cookie)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
}

#[derive(Clone)]
pub struct XClient {
    client: reqwest::Client,
    cookie: String,
    csrf_token: String,
    base_url: String,
}

impl XClient {
    /// Create a client from a full browser cookie string.
    ///
    /// Fails with [`XError::MissingCsrfToken`] when the cookie has no `ct0` field.
    pub fn new(cookie: impl Into<String>) -> Result<Self> {
        let cookie = cookie.into();
        let csrf_token = csrf_token(&cookie)
            .ok_or(XError::MissingCsrfToken)?
            .to_string();

        Ok(Self {
            client: reqwest::Client::new(),
            cookie,
            csrf_token,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Set a custom base URL (for tests and mirrors).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn csrf(&self) -> &str {
        &self.csrf_token
    }

    /// Fetch one page of the Bookmarks timeline.
    pub async fn bookmarks_page(
        &self,
        query_id: &str,
        count: usize,
        cursor: Option<&str>,
    ) -> Result<BookmarksPage> {
        let variables = BookmarksVariables {
            count,
            include_promoted_content: false,
            cursor: cursor.filter(|c| !c.is_empty()).map(str::to_string),
        };
        let variables = serde_json::to_string(&variables)?;
        let features = serde_json::to_string(&Features::default())?;

        let url = format!("{}/i/api/graphql/{}/Bookmarks", self.base_url, query_id);
        tracing::debug!(count, cursor = ?cursor, "Requesting bookmarks page");

        let resp = self
            .client
            .get(&url)
            .query(&[("variables", variables), ("features", features)])
            .bearer_auth(BEARER_TOKEN)
            .header("cookie", &self.cookie)
            .header("x-csrf-token", &self.csrf_token)
            .header("x-twitter-active-user", "yes")
            .header("x-twitter-auth-type", "OAuth2Session")
            .header("content-type", "application/json")
            .header("user-agent", USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(XError::Api {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let json: serde_json::Value = resp.json().await?;
        let page = parse_bookmarks_response(&json);
        tracing::info!(
            tweets = page.tweets.len(),
            has_cursor = page.cursor.is_some(),
            "Fetched bookmarks page"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_token_extraction() {
        let cookie = "guest_id=v1%3A1; ct0=abc123def; auth_token=zzz";
        assert_eq!(csrf_token(cookie), Some("abc123def"));

        let client = XClient::new(cookie).unwrap();
        assert_eq!(client.csrf(), "abc123def");
    }

    #[test]
    fn test_csrf_token_at_end_of_cookie() {
        assert_eq!(csrf_token("auth_token=zzz; ct0=last"), Some("last"));
    }

    #[test]
    fn test_missing_csrf_token_fails_fast() {
        let err = XClient::new("auth_token=zzz; guest_id=1").err().unwrap();
        assert!(matches!(err, XError::MissingCsrfToken));
        assert!(err.to_string().contains("ct0"));
    }

    #[test]
    fn test_client_builder() {
        let client = XClient::new("ct0=t")
            .unwrap()
            .with_base_url("http://127.0.0.1:9999");
        assert_eq!(client.base_url, "http://127.0.0.1:9999");
    }
}
