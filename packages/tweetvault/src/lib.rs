//! TweetVault: turn X bookmarks into an Obsidian vault.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! 1. **Fetch** through a [`BookmarkSource`]: [`JsonImporter`] for export files,
//!    [`LiveFetcher`] for the live timeline.
//! 2. **Classify** with a [`Classifier`] over any [`AI`] backend.
//! 3. **Generate** Markdown notes and indexes with [`VaultGenerator`].
//!
//! [`sync_bookmarks`] runs all three.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tweetvault::{sync_bookmarks, SyncConfig};
//!
//! let config = SyncConfig {
//!     input_path: Some("bookmarks.json".into()),
//!     ai: ai_client::AiConfig { provider: "claude".into(), api_key: Some(key), ..Default::default() },
//!     ..Default::default()
//! };
//!
//! let result = sync_bookmarks(&config, |p| println!("[{}/3] {}", p.step, p.detail)).await?;
//! println!("{} files in {}", result.files_created, result.output_dir.display());
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (BookmarkSource, AI)
//! - [`types`] - Data types shared across stages
//! - [`sources`] - Bookmark sources and the pagination loop
//! - [`classifier`] - Batched AI classification
//! - [`vault`] - Markdown vault generation
//! - [`sync`] - The orchestrator
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod classifier;
pub mod error;
pub mod sources;
pub mod sync;
pub mod testing;
pub mod traits;
pub mod types;
pub mod vault;

// Re-export core types at crate root
pub use classifier::{BatchProgress, Classifier, UNCATEGORIZED};
pub use error::{ClassifyError, SourceError, SyncError, VaultError};
pub use sources::{collect_bookmarks, JsonImporter, LiveFetcher, PageProgress};
pub use sync::{run_pipeline, sync_bookmarks, sync_bookmarks_with_resolver, SyncConfig, SyncProgress, SyncResult};
pub use traits::{ai::AI, source::BookmarkSource};
pub use types::{
    bookmark::{Bookmark, MediaItem, MediaType, Metrics},
    classified::{ClassificationResult, ClassifiedBookmark, ClassifierOptions},
    fetch::{FetchOptions, FetchResult},
    vault::{GenerateResult, VaultOptions},
};
pub use vault::{sanitize_path, VaultGenerator};
