//! Classifier inputs and outputs.

use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// A bookmark with its AI-assigned taxonomy. Only the classifier creates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedBookmark {
    pub bookmark: Bookmark,
    /// Never empty
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// In input order
    pub items: Vec<ClassifiedBookmark>,
    /// Deduplicated, first-seen order; may include categories no item uses
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassifierOptions {
    /// Categories the model should prefer
    pub categories: Option<Vec<String>>,
    /// Language for summaries
    pub language: Option<String>,
    /// Bookmarks per request; the backend's default when unset
    pub batch_size: Option<usize>,
}
