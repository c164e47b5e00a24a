//! Batch classification of bookmarks through an [`AI`] backend.

pub mod parse;
pub mod prompts;

use std::collections::HashMap;

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::error::ClassifyResult;
use crate::traits::ai::AI;
use crate::types::bookmark::Bookmark;
use crate::types::classified::{ClassificationResult, ClassifiedBookmark, ClassifierOptions};

pub use parse::UNCATEGORIZED;

/// Progress after each completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// 1-based batch number
    pub batch: usize,
    pub batches: usize,
    /// Bookmarks classified so far
    pub classified: usize,
}

/// Classifies bookmarks in fixed-size batches, strictly in series.
///
/// Any unparsable reply fails the whole call; there is no retry and no partial result.
pub struct Classifier<A: AI> {
    ai: A,
}

impl<A: AI> Classifier<A> {
    pub fn new(ai: A) -> Self {
        Self { ai }
    }

    pub fn ai(&self) -> &A {
        &self.ai
    }

    pub async fn classify(
        &self,
        bookmarks: &[Bookmark],
        options: &ClassifierOptions,
    ) -> ClassifyResult<ClassificationResult> {
        self.classify_with_progress(bookmarks, options, |_| {}).await
    }

    pub async fn classify_with_progress<F>(
        &self,
        bookmarks: &[Bookmark],
        options: &ClassifierOptions,
        mut on_batch: F,
    ) -> ClassifyResult<ClassificationResult>
    where
        F: FnMut(BatchProgress),
    {
        let batch_size = options
            .batch_size
            .unwrap_or_else(|| self.ai.default_batch_size())
            .max(1);
        let batches = bookmarks.len().div_ceil(batch_size);

        let mut items = Vec::with_capacity(bookmarks.len());
        let mut categories: IndexSet<String> = IndexSet::new();

        for (index, batch) in bookmarks.chunks(batch_size).enumerate() {
            debug!(batch = index + 1, size = batch.len(), "Classifying batch");

            let prompt = prompts::build_prompt(batch, options);
            let reply = self.ai.complete(&prompt).await?;
            let parsed = parse::parse_reply(&reply)?;

            let by_id: HashMap<&str, &Bookmark> =
                batch.iter().map(|b| (b.id.as_str(), b)).collect();

            for item in &parsed.items {
                let Some(bookmark) = item.id().and_then(|id| by_id.get(id.as_str()).copied())
                else {
                    debug!(id = ?item.id, "Dropping classification for unknown id");
                    continue;
                };

                let category = item.category();
                categories.insert(category.clone());
                items.push(ClassifiedBookmark {
                    bookmark: bookmark.clone(),
                    category,
                    subcategory: item
                        .subcategory
                        .clone()
                        .filter(|s| !s.trim().is_empty()),
                    tags: dedupe_tags(item.tags.as_deref().unwrap_or_default()),
                    summary: item.summary.clone().unwrap_or_default(),
                });
            }

            for category in parsed.categories {
                if !category.trim().is_empty() {
                    categories.insert(category);
                }
            }

            on_batch(BatchProgress {
                batch: index + 1,
                batches,
                classified: items.len(),
            });
        }

        info!(
            bookmarks = bookmarks.len(),
            classified = items.len(),
            categories = categories.len(),
            "Classification complete"
        );

        Ok(ClassificationResult {
            items,
            categories: categories.into_iter().collect(),
        })
    }
}

/// Non-blank tags, duplicates removed, first-seen order.
fn dedupe_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|t| !t.trim().is_empty())
        .cloned()
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifyError;
    use crate::testing::MockAI;

    fn bookmarks(n: usize) -> Vec<Bookmark> {
        (1..=n)
            .map(|i| Bookmark::new(i.to_string(), "a", format!("post {}", i)))
            .collect()
    }

    #[tokio::test]
    async fn test_batches_and_category_union() {
        let ai = MockAI::new()
            .with_reply(r#"{"items":[{"id":"1","category":"Tech","tags":["rust"],"summary":"s1"},{"id":"2","category":"Life","summary":"s2"}],"categories":["Tech","Life","Design"]}"#)
            .with_reply(r#"{"items":[{"id":3,"category":"Tech","subcategory":"Web"}],"categories":["Science","Tech"]}"#);
        let classifier = Classifier::new(ai);

        let options = ClassifierOptions {
            batch_size: Some(2),
            ..Default::default()
        };
        let result = classifier.classify(&bookmarks(3), &options).await.unwrap();

        assert_eq!(classifier.ai().prompts().len(), 2);
        assert_eq!(result.items.len(), 3);
        assert_eq!(result.items[0].tags, vec!["rust"]);
        assert!(result.items[1].tags.is_empty());
        assert_eq!(result.items[2].bookmark.id, "3");
        assert_eq!(result.items[2].subcategory.as_deref(), Some("Web"));
        assert_eq!(result.items[2].summary, "");
        assert_eq!(result.categories, vec!["Tech", "Life", "Design", "Science"]);
    }

    #[tokio::test]
    async fn test_null_categories_still_yield_items() {
        let ai = MockAI::new().with_reply(
            r#"{"items":[{"id":"1","category":"Tech","tags":null,"summary":null}],"categories":null}"#,
        );
        let result = Classifier::new(ai)
            .classify(&bookmarks(1), &ClassifierOptions::default())
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert!(result.items[0].tags.is_empty());
        assert_eq!(result.items[0].summary, "");
        assert_eq!(result.categories, vec!["Tech"]);
    }

    #[tokio::test]
    async fn test_duplicate_tags_are_collapsed() {
        let ai = MockAI::new().with_reply(
            r#"{"items":[{"id":"1","category":"Tech","tags":["rust","async","rust"," ","async"]}]}"#,
        );
        let result = Classifier::new(ai)
            .classify(&bookmarks(1), &ClassifierOptions::default())
            .await
            .unwrap();

        assert_eq!(result.items[0].tags, vec!["rust", "async"]);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_dropped() {
        let ai = MockAI::new().with_reply(
            r#"{"items":[{"id":"999","category":"X"},{"id":"1","category":"Tech"}],"categories":[]}"#,
        );
        let result = Classifier::new(ai)
            .classify(&bookmarks(1), &ClassifierOptions::default())
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].category, "Tech");
        assert_eq!(result.categories, vec!["Tech"]);
    }

    #[tokio::test]
    async fn test_reply_without_json_fails_the_call() {
        let ai = MockAI::new()
            .with_reply(r#"{"items":[{"id":"1","category":"Tech"}]}"#)
            .with_reply("sorry, I can't do that");
        let options = ClassifierOptions {
            batch_size: Some(1),
            ..Default::default()
        };

        let err = Classifier::new(ai)
            .classify(&bookmarks(2), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::NoJsonObject));
    }

    #[tokio::test]
    async fn test_batch_size_defaults_to_backend_and_zero_means_one() {
        let ai = MockAI::new().with_batch_size(10).with_default_reply(r#"{"items":[]}"#);
        let classifier = Classifier::new(ai);

        classifier
            .classify(&bookmarks(25), &ClassifierOptions::default())
            .await
            .unwrap();
        assert_eq!(classifier.ai().prompts().len(), 3);

        classifier.ai().clear_calls();
        let zero = ClassifierOptions {
            batch_size: Some(0),
            ..Default::default()
        };
        classifier.classify(&bookmarks(2), &zero).await.unwrap();
        assert_eq!(classifier.ai().prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let classifier = Classifier::new(MockAI::new());
        let result = classifier
            .classify(&[], &ClassifierOptions::default())
            .await
            .unwrap();
        assert!(result.items.is_empty());
        assert!(classifier.ai().prompts().is_empty());
    }

    #[tokio::test]
    async fn test_progress_per_batch() {
        let ai = MockAI::new().with_default_reply(r#"{"items":[{"id":"1","category":"A"}]}"#);
        let options = ClassifierOptions {
            batch_size: Some(1),
            ..Default::default()
        };

        let mut seen = Vec::new();
        Classifier::new(ai)
            .classify_with_progress(&bookmarks(2), &options, |p| seen.push(p))
            .await
            .unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], BatchProgress { batch: 2, batches: 2, classified: 1 });
    }
}
