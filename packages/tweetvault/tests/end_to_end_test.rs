//! Full pipeline runs over a real import file, a mock AI backend and a temp vault.

use std::fs;

use serde_json::json;
use tempfile::TempDir;
use tweetvault::testing::{MockAI, MockSource};
use tweetvault::{
    run_pipeline, Bookmark, ClassifyError, JsonImporter, SyncConfig, SyncError, SyncProgress,
};

fn write_import(dir: &TempDir, document: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("bookmarks.json");
    fs::write(&path, document.to_string()).unwrap();
    path
}

fn config(dir: &TempDir) -> SyncConfig {
    SyncConfig {
        output_dir: dir.path().join("vault"),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_import_classify_generate() {
    let dir = TempDir::new().unwrap();
    let input = write_import(
        &dir,
        json!({ "bookmarks": [{ "id": "1", "full_text": "hello", "user": { "screen_name": "a" } }] }),
    );

    let ai = MockAI::new().with_reply(
        r#"{"items":[{"id":"1","category":"Tech","tags":[],"summary":"s"}],"categories":["Tech"]}"#,
    );
    let config = config(&dir);
    let source = JsonImporter::new(&input);

    let result = run_pipeline(&config, &source, ai, |_| {}).await.unwrap();

    let vault = dir.path().join("vault");
    let note = fs::read_to_string(vault.join("Tech/a-1.md")).unwrap();
    assert!(note.contains("category: \"Tech\""));
    assert!(note.contains("\nhello\n"));
    assert!(vault.join("Tech/_index.md").is_file());
    assert!(vault.join("_index.md").is_file());

    assert_eq!(result.bookmark_count, 1);
    assert_eq!(result.files_created, 3);
    assert_eq!(result.categories, vec!["Tech"]);
    assert_eq!(result.output_dir, vault);
    assert_eq!(result.classification.items.len(), 1);
}

#[tokio::test]
async fn test_progress_steps_are_ordered() {
    let dir = TempDir::new().unwrap();
    let source = MockSource::new().with_page(vec![Bookmark::new("1", "a", "x")], None);
    let ai = MockAI::new().with_reply(r#"{"items":[{"id":"1","category":"A"}]}"#);

    let mut events: Vec<SyncProgress> = Vec::new();
    run_pipeline(&config(&dir), &source, ai, |p| events.push(p))
        .await
        .unwrap();

    let steps: Vec<u8> = events.iter().map(|e| e.step).collect();
    assert!(steps.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(steps.first(), Some(&1));
    assert_eq!(steps.last(), Some(&3));
    assert!(events.iter().any(|e| e.step == 2 && e.detail.contains("batch 1/1")));
}

#[tokio::test]
async fn test_empty_source_is_no_bookmarks() {
    let dir = TempDir::new().unwrap();
    let ai = MockAI::new();

    let err = run_pipeline(&config(&dir), &MockSource::new(), ai.clone(), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::NoBookmarks));
    assert!(ai.prompts().is_empty());
    assert!(!dir.path().join("vault").exists());
}

#[tokio::test]
async fn test_unparsable_reply_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = MockSource::new().with_page(vec![Bookmark::new("1", "a", "x")], None);
    let ai = MockAI::new().with_reply("no json here");

    let err = run_pipeline(&config(&dir), &source, ai, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Classify(ClassifyError::NoJsonObject)
    ));
    assert!(!dir.path().join("vault").exists());
}

#[tokio::test]
async fn test_missing_import_file_is_fetch_error() {
    let dir = TempDir::new().unwrap();
    let source = JsonImporter::new(dir.path().join("missing.json"));

    let err = run_pipeline(&config(&dir), &source, MockAI::new(), |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Fetch(_)));
}

#[tokio::test]
async fn test_options_reach_classifier_and_vault() {
    let dir = TempDir::new().unwrap();
    let source = MockSource::new().with_page(
        (1..=3).map(|i| Bookmark::new(i.to_string(), "a", "x")).collect(),
        None,
    );
    let ai = MockAI::new().with_default_reply(r#"{"items":[{"id":"1","category":"A"}]}"#);

    let config = SyncConfig {
        batch_size: Some(1),
        language: Some("German".into()),
        categories: Some(vec!["A".into(), "B".into()]),
        create_index: false,
        ..config(&dir)
    };
    let result = run_pipeline(&config, &source, ai.clone(), |_| {}).await.unwrap();

    let prompts = ai.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("Use these categories: A, B"));
    assert!(prompts[0].ends_with("Respond with summaries in German."));

    assert_eq!(result.files_created, 1);
    assert!(!dir.path().join("vault/_index.md").exists());
}
