//! User configuration.
//!
//! Read from `~/.tweetvault/config.toml`; every section and key is optional. Environment
//! variables override the file and command-line flags override both:
//!
//! - `TWEETVAULT_PROVIDER`, `TWEETVAULT_API_KEY`, `TWEETVAULT_MODEL`, `TWEETVAULT_BASE_URL`
//! - `X_COOKIE`

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".tweetvault";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiSection,
    pub output: OutputSection,
    pub fetch: FetchSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSection {
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            provider: "claude".to_string(),
            api_key: None,
            model: None,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
    pub vault_name: String,
    pub include_media: bool,
    pub create_index: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./tweetvault-output"),
            vault_name: "TweetVault".to_string(),
            include_media: true,
            create_index: true,
            language: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_path: Option<PathBuf>,
    pub limit: usize,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            cookie: None,
            json_path: None,
            limit: 100,
        }
    }
}

impl Config {
    /// `~/.tweetvault/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the user's config file and apply environment overrides.
    pub fn load_default() -> Result<Self> {
        let mut config = Self::load(&Self::default_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply `TWEETVAULT_*` and `X_COOKIE` overrides from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(provider) = get("TWEETVAULT_PROVIDER") {
            self.ai.provider = provider;
        }
        if let Some(key) = get("TWEETVAULT_API_KEY") {
            self.ai.api_key = Some(key);
        }
        if let Some(model) = get("TWEETVAULT_MODEL") {
            self.ai.model = Some(model);
        }
        if let Some(url) = get("TWEETVAULT_BASE_URL") {
            self.ai.base_url = Some(url);
        }
        if let Some(cookie) = get("X_COOKIE") {
            self.fetch.cookie = Some(cookie);
        }
    }

    /// Write to `path`, creating parent directories. Refuses to overwrite unless `force`.
    pub fn save(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Copy with secrets masked, for display.
    pub fn masked(&self) -> Self {
        let mut config = self.clone();
        config.ai.api_key = config.ai.api_key.as_deref().map(mask);
        config.fetch.cookie = config.fetch.cookie.as_deref().map(mask);
        config
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "********".to_string()
    } else {
        format!("{}********", visible)
    }
}
