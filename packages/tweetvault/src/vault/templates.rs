//! Markdown rendering for notes and indexes.
//!
//! All output is a pure function of its inputs so that re-running a sync over the same
//! items rewrites identical bytes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::sanitize::sanitize_path;
use crate::types::bookmark::{Bookmark, MediaType};
use crate::types::classified::ClassifiedBookmark;

/// Vendor timestamp layout, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const VENDOR_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// ISO timestamp without an offset, e.g. `2024-01-02T03:04:05.250`.
const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// `<handle-or-unknown>-<id>`, safe to use as a file stem.
pub fn note_stem(bookmark: &Bookmark) -> String {
    let handle = if bookmark.author_handle.is_empty() {
        "unknown"
    } else {
        bookmark.author_handle.as_str()
    };
    sanitize_path(&format!("{}-{}", handle, bookmark.id))
}

/// ISO date (`YYYY-MM-DD`) of a source timestamp, if it parses.
pub fn parse_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, VENDOR_DATE_FORMAT))
        .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
        .map(|dt| dt.naive_utc().date())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, NAIVE_DATETIME_FORMAT).map(|dt| dt.date())
        })
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok()
}

/// [`parse_date`], or the raw string when it does not parse.
pub fn format_date(raw: &str) -> String {
    parse_date(raw).unwrap_or_else(|| raw.to_string())
}

/// Double-quoted YAML scalar.
fn quoted(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', " ");
    format!("\"{}\"", escaped)
}

pub fn render_bookmark(item: &ClassifiedBookmark, include_media: bool) -> String {
    let bookmark = &item.bookmark;
    let mut lines: Vec<String> = Vec::new();

    lines.push("---".into());
    lines.push(format!("title: {}", quoted(&format!("Tweet by @{}", bookmark.author_handle))));
    lines.push(format!("author: {}", quoted(&format!("@{}", bookmark.author_handle))));
    lines.push(format!("author_name: {}", quoted(&bookmark.author_name)));
    if !bookmark.created_at.trim().is_empty() {
        // Unparsed dates may contain YAML syntax.
        let date = parse_date(&bookmark.created_at)
            .unwrap_or_else(|| quoted(bookmark.created_at.trim()));
        lines.push(format!("date: {}", date));
    }
    lines.push(format!("url: {}", bookmark.url));
    lines.push(format!("category: {}", quoted(&item.category)));
    if let Some(subcategory) = &item.subcategory {
        lines.push(format!("subcategory: {}", quoted(subcategory)));
    }
    let tags: Vec<String> = item.tags.iter().map(|t| quoted(t)).collect();
    lines.push(format!("tags: [{}]", tags.join(", ")));
    lines.push("---".into());
    lines.push(String::new());

    lines.push(format!("> {}", item.summary));
    lines.push(String::new());

    lines.push(bookmark.text.clone());
    lines.push(String::new());

    if let Some(quote) = &bookmark.quoted_tweet {
        lines.push(format!("> **Quoting @{}**", quote.author_handle));
        for line in quote.text.lines() {
            lines.push(format!("> {}", line));
        }
        lines.push(format!("> [Original]({})", quote.url));
        lines.push(String::new());
    }

    if include_media && !bookmark.media.is_empty() {
        lines.push("## Media".into());
        for media in &bookmark.media {
            match media.kind {
                MediaType::Photo => lines.push(format!(
                    "![{}]({})",
                    media.alt_text.as_deref().unwrap_or("image"),
                    media.url
                )),
                kind => lines.push(format!("- [{}]({})", media_label(kind), media.url)),
            }
        }
        lines.push(String::new());
    }

    if let Some(metrics) = &bookmark.metrics {
        let mut footer = format!(
            "*{} likes · {} retweets · {} replies",
            metrics.likes, metrics.retweets, metrics.replies
        );
        if let Some(views) = metrics.views {
            footer.push_str(&format!(" · {} views", views));
        }
        footer.push('*');
        lines.push("---".into());
        lines.push(footer);
        lines.push(String::new());
    }

    lines.push(format!("[View on X]({})", bookmark.url));
    finish(lines)
}

fn media_label(kind: MediaType) -> &'static str {
    match kind {
        MediaType::Photo => "photo",
        MediaType::Video => "video",
        MediaType::Gif => "gif",
    }
}

/// Index of one category directory.
pub fn render_category_index(title: &str, items: &[&ClassifiedBookmark]) -> String {
    let mut lines: Vec<String> = vec![
        "---".into(),
        format!("title: {}", quoted(title)),
        "type: category-index".into(),
        format!("count: {}", items.len()),
        "---".into(),
        String::new(),
        format!("# {}", title),
        String::new(),
        format!("{} bookmarks in this category.", items.len()),
        String::new(),
    ];

    for item in items {
        lines.push(format!(
            "- [[{}|@{}]]: {}",
            note_stem(&item.bookmark),
            item.bookmark.author_handle,
            item.summary
        ));
    }

    finish(lines)
}

/// One row of the root index.
pub struct IndexEntry<'a> {
    pub dir: &'a str,
    pub title: &'a str,
    pub count: usize,
}

pub fn render_root_index(vault_name: &str, entries: &[IndexEntry<'_>]) -> String {
    let total: usize = entries.iter().map(|e| e.count).sum();

    let mut lines: Vec<String> = vec![
        "---".into(),
        format!("title: {}", quoted(vault_name)),
        "type: vault-index".into(),
        "---".into(),
        String::new(),
        format!("# {}", vault_name),
        String::new(),
        format!("{} bookmarks across {} categories.", total, entries.len()),
        String::new(),
    ];

    for entry in entries {
        lines.push(format!(
            "- **[[{}/_index|{}]]** ({})",
            entry.dir, entry.title, entry.count
        ));
    }

    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
