//! Vault generator options and results.

use std::path::PathBuf;

pub const DEFAULT_VAULT_NAME: &str = "TweetVault";

#[derive(Debug, Clone)]
pub struct VaultOptions {
    pub output_dir: PathBuf,
    /// Title of the root index
    pub vault_name: String,
    /// Write `_index.md` files
    pub create_index: bool,
    /// Render the `## Media` section
    pub include_media: bool,
}

impl VaultOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            vault_name: DEFAULT_VAULT_NAME.to_string(),
            create_index: true,
            include_media: true,
        }
    }

    pub fn with_vault_name(mut self, name: impl Into<String>) -> Self {
        self.vault_name = name.into();
        self
    }

    pub fn with_create_index(mut self, create_index: bool) -> Self {
        self.create_index = create_index;
        self
    }

    pub fn with_include_media(mut self, include_media: bool) -> Self {
        self.include_media = include_media;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// Notes plus index documents written
    pub files_created: usize,
    /// Exact category strings, first-seen order
    pub categories_created: Vec<String>,
    pub output_dir: PathBuf,
}
