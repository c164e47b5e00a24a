//! Bookmarks query identifier discovery.
//!
//! X rotates the GraphQL operation identifiers periodically. The current one is embedded
//! in the web client's main bundle, so we scrape it from there. Any failure along the way
//! yields the last known good identifier instead of an error.

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::USER_AGENT;

/// Last known good Bookmarks query identifier.
pub const FALLBACK_QUERY_ID: &str = "-LGfdImKeQz0xS_jjUwzlA";

const HOME_URL: &str = "https://x.com";

static MAIN_BUNDLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^"'\s<>]+/responsive-web/client-web/main\.[a-z0-9]+\.js"#)
        .expect("main bundle pattern is valid")
});

static QUERY_ID_PRIMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"queryId:"([^"]+)",operationName:"Bookmarks""#)
        .expect("primary query id pattern is valid")
});

// Object-literal key order is not stable across builds.
static QUERY_ID_ALTERNATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{queryId:"([^"]+)"[^}]*operationName:"Bookmarks""#)
        .expect("alternate query id pattern is valid")
});

/// Lazily resolves and caches the Bookmarks query identifier.
///
/// Share one instance per process (behind an `Arc`); the first `resolve` performs at most
/// one landing-page fetch and one bundle fetch, and every later call returns the cached value.
pub struct QueryIdResolver {
    client: reqwest::Client,
    home_url: String,
    cached: OnceCell<String>,
}

impl Default for QueryIdResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryIdResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            home_url: HOME_URL.to_string(),
            cached: OnceCell::new(),
        }
    }

    /// Set a custom landing page URL (for tests and mirrors).
    pub fn with_home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = url.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Return the cached identifier, discovering it on first use.
    pub async fn resolve(&self) -> String {
        self.cached
            .get_or_init(|| async {
                match self.discover().await {
                    Some(id) => {
                        info!(query_id = %id, "Resolved Bookmarks query id");
                        id
                    }
                    None => {
                        warn!(
                            query_id = FALLBACK_QUERY_ID,
                            "Could not resolve Bookmarks query id, using fallback"
                        );
                        FALLBACK_QUERY_ID.to_string()
                    }
                }
            })
            .await
            .clone()
    }

    /// Value cached by a previous `resolve`, if any.
    pub fn cached(&self) -> Option<&str> {
        self.cached.get().map(String::as_str)
    }

    /// Forget the cached identifier so the next `resolve` scrapes again.
    pub fn reset(&mut self) {
        self.cached.take();
    }

    async fn discover(&self) -> Option<String> {
        let html = self.get_text(&self.home_url).await?;
        let bundle_url = MAIN_BUNDLE.find(&html)?.as_str().to_string();
        debug!(bundle_url = %bundle_url, "Found main bundle");

        let js = self.get_text(&bundle_url).await?;
        extract_query_id(&js)
    }

    async fn get_text(&self, url: &str) -> Option<String> {
        let resp = self
            .client
            .get(url)
            .header("user-agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| warn!(url, error = %e, "Query id discovery request failed"))
            .ok()?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Query id discovery got non-success status");
            return None;
        }

        resp.text().await.ok()
    }
}

/// Find the Bookmarks query identifier in a bundle's source.
pub fn extract_query_id(js: &str) -> Option<String> {
    QUERY_ID_PRIMARY
        .captures(js)
        .or_else(|| QUERY_ID_ALTERNATE.captures(js))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_primary_pattern() {
        let js = r#"e.exports={queryId:"abc-123",operationName:"Bookmarks",operationType:"query"}"#;
        assert_eq!(extract_query_id(js).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_extract_alternate_pattern() {
        let js = r#"{queryId:"xyz_9",operationType:"query",operationName:"Bookmarks"}"#;
        assert_eq!(extract_query_id(js).as_deref(), Some("xyz_9"));
    }

    #[test]
    fn test_other_operations_do_not_match() {
        let js = r#"{queryId:"nope",operationName:"BookmarkFolders"},{queryId:"no2",operationName:"Likes"}"#;
        assert_eq!(extract_query_id(js), None);
    }

    #[test]
    fn test_main_bundle_pattern() {
        let html = r#"<script src="https://abs.twimg.com/responsive-web/client-web/main.8f3a2b1c.js" nonce="x"></script>"#;
        assert_eq!(
            MAIN_BUNDLE.find(html).map(|m| m.as_str()),
            Some("https://abs.twimg.com/responsive-web/client-web/main.8f3a2b1c.js")
        );
    }
}
