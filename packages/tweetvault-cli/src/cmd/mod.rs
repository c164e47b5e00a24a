//! Subcommands and the flag groups they share.
//!
//! Every flag is optional and falls back to the loaded [`Config`](crate::config::Config),
//! which already carries environment overrides.

pub mod classify;
pub mod config;
pub mod fetch;
pub mod generate;
pub mod sync;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ai_client::AiConfig;
use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tweetvault::{BookmarkSource, ClassifierOptions, JsonImporter, LiveFetcher, VaultOptions};
use x_client::QueryIdResolver;

use crate::config::Config;

/// Where bookmarks come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Browser cookie string for live fetching (must contain ct0)
    #[arg(short, long)]
    pub cookie: Option<String>,

    /// Bookmarks export file; takes precedence over --cookie
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Maximum number of bookmarks to fetch
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Which model classifies, and how.
#[derive(Args, Debug, Clone, Default)]
pub struct AiArgs {
    /// AI provider (claude, openai, ollama, deepseek, ...)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// API key for the provider
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Model name; the provider's default when omitted
    #[arg(short, long)]
    pub model: Option<String>,

    /// Custom OpenAI-compatible endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Language for summaries (e.g. "Japanese")
    #[arg(long)]
    pub language: Option<String>,

    /// Preferred categories, comma separated
    #[arg(long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,

    /// Bookmarks per classification request
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Vault layout.
#[derive(Args, Debug, Clone, Default)]
pub struct VaultArgs {
    /// Output directory for the vault
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Title of the root index
    #[arg(short = 'n', long = "name")]
    pub vault_name: Option<String>,

    /// Skip the media section in notes
    #[arg(long)]
    pub no_media: bool,

    /// Skip _index.md files
    #[arg(long)]
    pub no_index: bool,
}

/// A bookmark source resolved from flags and config.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceChoice {
    Import(PathBuf),
    Live(String),
}

impl SourceArgs {
    pub fn resolve(&self, config: &Config) -> Result<SourceChoice> {
        if let Some(path) = self.input.clone().or_else(|| config.fetch.json_path.clone()) {
            return Ok(SourceChoice::Import(path));
        }

        match self.cookie.clone().or_else(|| config.fetch.cookie.clone()) {
            Some(cookie) if !cookie.trim().is_empty() => Ok(SourceChoice::Live(cookie)),
            _ => bail!(
                "No bookmark source: pass --input <file> or --cookie <cookie> (or set X_COOKIE)"
            ),
        }
    }

    /// Imports read the whole file unless `--limit` is given; live fetches fall back
    /// to the configured limit.
    pub fn limit_for(&self, choice: &SourceChoice, config: &Config) -> Option<usize> {
        match choice {
            SourceChoice::Import(_) => self.limit,
            SourceChoice::Live(_) => Some(self.limit.unwrap_or(config.fetch.limit)),
        }
    }
}

impl SourceChoice {
    pub fn into_source(self) -> Result<Box<dyn BookmarkSource>> {
        Ok(match self {
            SourceChoice::Import(path) => Box::new(JsonImporter::new(path)),
            SourceChoice::Live(cookie) => Box::new(
                LiveFetcher::new(cookie, Arc::new(QueryIdResolver::new()))
                    .context("Invalid cookie")?,
            ),
        })
    }
}

impl AiArgs {
    pub fn ai_config(&self, config: &Config) -> AiConfig {
        AiConfig {
            provider: self
                .provider
                .clone()
                .unwrap_or_else(|| config.ai.provider.clone()),
            api_key: self.api_key.clone().or_else(|| config.ai.api_key.clone()),
            model: self.model.clone().or_else(|| config.ai.model.clone()),
            base_url: self.base_url.clone().or_else(|| config.ai.base_url.clone()),
        }
    }

    pub fn classifier_options(&self, config: &Config) -> ClassifierOptions {
        ClassifierOptions {
            categories: self.categories.as_ref().and_then(|c| {
                let c: Vec<String> = c
                    .iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                (!c.is_empty()).then_some(c)
            }),
            language: self
                .language
                .clone()
                .or_else(|| config.output.language.clone()),
            batch_size: self.batch_size,
        }
    }
}

impl VaultArgs {
    pub fn vault_options(&self, config: &Config) -> VaultOptions {
        VaultOptions::new(self.output.clone().unwrap_or_else(|| config.output.dir.clone()))
            .with_vault_name(
                self.vault_name
                    .clone()
                    .unwrap_or_else(|| config.output.vault_name.clone()),
            )
            .with_include_media(config.output.include_media && !self.no_media)
            .with_create_index(config.output.create_index && !self.no_index)
    }
}

/// Pretty-print `value` as JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_wins_over_cookie() {
        let args = SourceArgs {
            cookie: Some("ct0=a".into()),
            input: Some("b.json".into()),
            limit: None,
        };
        assert_eq!(
            args.resolve(&Config::default()).unwrap(),
            SourceChoice::Import("b.json".into())
        );
    }

    #[test]
    fn test_cookie_from_config() {
        let mut config = Config::default();
        config.fetch.cookie = Some("ct0=cfg".into());
        assert_eq!(
            SourceArgs::default().resolve(&config).unwrap(),
            SourceChoice::Live("ct0=cfg".into())
        );
    }

    #[test]
    fn test_limit_applies_to_live_by_default() {
        let config = Config::default();
        let args = SourceArgs::default();
        assert_eq!(args.limit_for(&SourceChoice::Import("a".into()), &config), None);
        assert_eq!(args.limit_for(&SourceChoice::Live("ct0=a".into()), &config), Some(100));
    }

    #[test]
    fn test_no_source_is_an_error() {
        assert!(SourceArgs::default().resolve(&Config::default()).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.ai.provider = "ollama".into();
        config.ai.model = Some("llama3".into());

        let args = AiArgs {
            provider: Some("openai".into()),
            ..Default::default()
        };
        let ai = args.ai_config(&config);
        assert_eq!(ai.provider, "openai");
        assert_eq!(ai.model.as_deref(), Some("llama3"));
    }

    #[test]
    fn test_categories_are_trimmed() {
        let args = AiArgs {
            categories: Some(vec![" Tech".into(), "".into(), "Art ".into()]),
            ..Default::default()
        };
        let options = args.classifier_options(&Config::default());
        assert_eq!(options.categories, Some(vec!["Tech".into(), "Art".into()]));
    }

    #[test]
    fn test_vault_flags_disable_config_defaults() {
        let args = VaultArgs {
            no_media: true,
            ..Default::default()
        };
        let options = args.vault_options(&Config::default());
        assert!(!options.include_media);
        assert!(options.create_index);
        assert_eq!(options.vault_name, "TweetVault");
    }

    #[test]
    fn test_write_json_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("x.json");
        write_json(&path, &serde_json::json!({ "a": 1 })).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"a\": 1"));
    }
}
