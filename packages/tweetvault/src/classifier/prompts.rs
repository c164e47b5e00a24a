//! LLM prompt for batch classification.

use crate::types::{bookmark::Bookmark, classified::ClassifierOptions};

/// Handles longer than this are cut in the manifest.
pub const MAX_HANDLE_CHARS: usize = 32;

/// Post text longer than this is cut in the manifest.
pub const MAX_TEXT_CHARS: usize = 500;

/// Instruction and output contract, followed by the manifest.
pub const CLASSIFICATION_PROMPT: &str = r#"You are a bookmark classifier. Given a list of tweets/posts, classify each one into a category and subcategory, assign relevant tags, and write a brief summary.

Respond in JSON format:
{
  "items": [
    {
      "id": "tweet_id",
      "category": "Main Category",
      "subcategory": "Sub Category (optional)",
      "tags": ["tag1", "tag2"],
      "summary": "One sentence summary"
    }
  ],
  "categories": ["Category1", "Category2"]
}

Categories should be broad topics like: Tech, AI/ML, Design, Business, Life, Science, Programming, etc.
Keep categories concise and reusable. Aim for 5-15 total categories.

Tweets to classify:
"#;

/// One manifest line: `[ID: <id>] @<handle>: <text>`.
pub fn manifest_line(bookmark: &Bookmark) -> String {
    format!(
        "[ID: {}] @{}: {}",
        bookmark.id,
        truncate_chars(&bookmark.author_handle, MAX_HANDLE_CHARS),
        truncate_chars(&bookmark.text, MAX_TEXT_CHARS)
    )
}

/// Full prompt for one batch.
pub fn build_prompt(batch: &[Bookmark], options: &ClassifierOptions) -> String {
    let manifest = batch
        .iter()
        .map(manifest_line)
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut prompt = format!("{}{}", CLASSIFICATION_PROMPT, manifest);

    if let Some(categories) = options.categories.as_ref().filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("\n\nUse these categories: {}", categories.join(", ")));
    }
    if let Some(language) = options.language.as_deref().filter(|l| !l.trim().is_empty()) {
        prompt.push_str(&format!("\n\nRespond with summaries in {}.", language));
    }

    prompt
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
