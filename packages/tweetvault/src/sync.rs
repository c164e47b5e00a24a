//! Sync orchestrator: fetch, classify, generate.
//!
//! Stages run strictly in series. A failing stage aborts the sync with its error wrapped
//! in [`SyncError`]; anything an earlier stage already wrote stays on disk.

use std::path::PathBuf;
use std::sync::Arc;

use ai_client::{AiClient, AiConfig};
use tracing::info;
use x_client::QueryIdResolver;

use crate::classifier::Classifier;
use crate::error::{Result, SyncError};
use crate::sources::{collect_bookmarks, JsonImporter, LiveFetcher};
use crate::traits::{ai::AI, source::BookmarkSource};
use crate::types::classified::{ClassificationResult, ClassifierOptions};
use crate::types::vault::{VaultOptions, DEFAULT_VAULT_NAME};
use crate::vault::VaultGenerator;

/// Everything one sync needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Import file; wins over `cookie` when both are set
    pub input_path: Option<PathBuf>,
    /// Browser cookie for live fetching
    pub cookie: Option<String>,
    /// Maximum bookmarks to fetch
    pub limit: Option<usize>,
    pub ai: AiConfig,
    pub output_dir: PathBuf,
    pub vault_name: String,
    pub include_media: bool,
    pub create_index: bool,
    pub language: Option<String>,
    pub categories: Option<Vec<String>>,
    pub batch_size: Option<usize>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            cookie: None,
            limit: None,
            ai: AiConfig::default(),
            output_dir: PathBuf::from("./tweetvault-output"),
            vault_name: DEFAULT_VAULT_NAME.to_string(),
            include_media: true,
            create_index: true,
            language: None,
            categories: None,
            batch_size: None,
        }
    }
}

impl SyncConfig {
    /// Check the configuration before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        let has_cookie = self.cookie.as_deref().is_some_and(|c| !c.trim().is_empty());
        if self.input_path.is_none() && !has_cookie {
            return Err(SyncError::Config(
                "no bookmark source: provide an input file or a cookie".into(),
            ));
        }

        let is_local = ai_client::lookup(&self.ai.provider).is_some_and(|p| p.format.is_local());
        let has_key = self.ai.api_key.as_deref().is_some_and(|k| !k.trim().is_empty());
        if !is_local && !has_key {
            return Err(SyncError::Config(format!(
                "API key required for provider '{}'",
                self.ai.provider
            )));
        }

        Ok(())
    }

    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            categories: self.categories.clone(),
            language: self.language.clone(),
            batch_size: self.batch_size,
        }
    }

    pub fn vault_options(&self) -> VaultOptions {
        VaultOptions::new(&self.output_dir)
            .with_vault_name(self.vault_name.clone())
            .with_create_index(self.create_index)
            .with_include_media(self.include_media)
    }
}

/// Progress event; `step` is 1 (fetch), 2 (classify) or 3 (generate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncProgress {
    pub step: u8,
    pub detail: String,
}

impl SyncProgress {
    fn new(step: u8, detail: impl Into<String>) -> Self {
        Self {
            step,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncResult {
    pub files_created: usize,
    /// Categories reported by the classifier, first-seen order
    pub categories: Vec<String>,
    pub output_dir: PathBuf,
    pub bookmark_count: usize,
    pub classification: ClassificationResult,
}

/// Run a full sync with a fresh query id resolver.
pub async fn sync_bookmarks<F>(config: &SyncConfig, on_progress: F) -> Result<SyncResult>
where
    F: FnMut(SyncProgress),
{
    sync_bookmarks_with_resolver(config, Arc::new(QueryIdResolver::new()), on_progress).await
}

/// Run a full sync, sharing `resolver` with other live fetches in this process.
pub async fn sync_bookmarks_with_resolver<F>(
    config: &SyncConfig,
    resolver: Arc<QueryIdResolver>,
    on_progress: F,
) -> Result<SyncResult>
where
    F: FnMut(SyncProgress),
{
    config.validate()?;
    let ai = AiClient::new(config.ai.clone()).map_err(|e| SyncError::Config(e.to_string()))?;

    let source: Box<dyn BookmarkSource> = match &config.input_path {
        Some(path) => Box::new(JsonImporter::new(path)),
        None => {
            let cookie = config.cookie.clone().unwrap_or_default();
            Box::new(LiveFetcher::new(cookie, resolver)?)
        }
    };

    run_pipeline(config, source.as_ref(), ai, on_progress).await
}

/// The three stages over an injected source and backend.
pub async fn run_pipeline<S, A, F>(
    config: &SyncConfig,
    source: &S,
    ai: A,
    mut on_progress: F,
) -> Result<SyncResult>
where
    S: BookmarkSource + ?Sized,
    A: AI,
    F: FnMut(SyncProgress),
{
    on_progress(SyncProgress::new(1, "Fetching bookmarks..."));
    let bookmarks = collect_bookmarks(source, config.limit, |page| {
        on_progress(SyncProgress::new(
            1,
            format!("Fetched {} bookmarks (page {})", page.total, page.page),
        ));
    })
    .await?;

    if bookmarks.is_empty() {
        return Err(SyncError::NoBookmarks);
    }
    info!(count = bookmarks.len(), "Fetched bookmarks");

    on_progress(SyncProgress::new(
        2,
        format!("Classifying {} bookmarks...", bookmarks.len()),
    ));
    let classification = Classifier::new(ai)
        .classify_with_progress(&bookmarks, &config.classifier_options(), |batch| {
            on_progress(SyncProgress::new(
                2,
                format!("Classified batch {}/{}", batch.batch, batch.batches),
            ));
        })
        .await?;
    on_progress(SyncProgress::new(
        2,
        format!(
            "Classified into {} categories",
            classification.categories.len()
        ),
    ));

    on_progress(SyncProgress::new(3, "Generating Obsidian vault..."));
    let generated = VaultGenerator::new()
        .generate(&classification.items, &config.vault_options())
        .await?;
    on_progress(SyncProgress::new(
        3,
        format!("Generated {} files", generated.files_created),
    ));

    Ok(SyncResult {
        files_created: generated.files_created,
        categories: classification.categories.clone(),
        output_dir: generated.output_dir,
        bookmark_count: bookmarks.len(),
        classification,
    })
}
