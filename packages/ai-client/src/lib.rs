//! Provider-agnostic completion client.
//!
//! One [`AiClient`] talks to any of the built-in providers (see [`PROVIDERS`]) or to an
//! arbitrary OpenAI-compatible endpoint. Callers hand it a single user prompt and get the
//! model's text reply back; the request/response translation happens per [`ApiFormat`].
//!
//! # Example
//!
//! ```rust,ignore
//! use ai_client::{AiClient, AiConfig};
//!
//! let client = AiClient::new(AiConfig {
//!     provider: "deepseek".into(),
//!     api_key: Some(key),
//!     ..Default::default()
//! })?;
//!
//! let reply = client.complete("Summarize this in one line: ...").await?;
//! ```

pub mod error;
pub mod provider;
pub mod types;

pub use error::{AiError, Result};
pub use provider::{lookup, provider_names, ApiFormat, ProviderSpec, PROVIDERS};
pub use types::*;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MAX_TOKENS: u32 = 4096;

/// Error bodies are cut to this many characters.
const ERROR_BODY_LIMIT: usize = 200;

/// Provider selection and overrides.
#[derive(Debug, Clone, Default)]
pub struct AiConfig {
    /// Built-in provider name, or any other name for a custom OpenAI-compatible endpoint
    pub provider: String,
    pub api_key: Option<String>,
    /// Overrides the provider's default model
    pub model: Option<String>,
    /// Overrides the provider's default endpoint; required for unknown providers
    pub base_url: Option<String>,
}

#[derive(Clone)]
pub struct AiClient {
    http_client: Client,
    provider: String,
    format: ApiFormat,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for AiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiClient")
            .field("provider", &self.provider)
            .field("format", &self.format)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl AiClient {
    /// Resolve a provider against the built-in table and validate the result.
    ///
    /// Fails with [`AiError::Config`] when an unknown provider has no base URL or a
    /// hosted provider has no API key.
    pub fn new(config: AiConfig) -> Result<Self> {
        let AiConfig {
            provider,
            api_key,
            model,
            base_url,
        } = config;

        let api_key = api_key.filter(|k| !k.trim().is_empty());
        let model = model.filter(|m| !m.trim().is_empty());
        let base_url = base_url.filter(|u| !u.trim().is_empty());

        let (format, default_base, default_model) = match lookup(&provider) {
            Some(spec) => (spec.format, Some(spec.base_url), spec.model),
            None => (ApiFormat::OpenAI, None, "gpt-4o-mini"),
        };

        let base_url = match (base_url, default_base) {
            (Some(url), _) => url,
            (None, Some(url)) => url.to_string(),
            (None, None) => {
                return Err(AiError::Config(format!(
                    "unknown provider '{}' requires a base URL",
                    provider
                )))
            }
        };

        if !format.is_local() && api_key.is_none() {
            return Err(AiError::Config(format!(
                "provider '{}' requires an API key",
                provider
            )));
        }

        Ok(Self {
            http_client: Client::new(),
            provider,
            format,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_else(|| default_model.to_string()),
            api_key,
        })
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn format(&self) -> ApiFormat {
        self.format
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_local(&self) -> bool {
        self.format.is_local()
    }

    /// Send one user prompt and return the model's text reply.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();

        let text = match self.format {
            ApiFormat::OpenAI => self.chat_completion(prompt).await?,
            ApiFormat::Anthropic => self.messages(prompt).await?,
            ApiFormat::Local => self.generate(prompt).await?,
        };

        debug!(
            provider = %self.provider,
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            reply_len = text.len(),
            "AI completion"
        );

        Ok(text)
    }

    async fn chat_completion(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
        };

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response: types::ChatResponse = self.send(builder).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::Parse("response has no choices".into()))
    }

    async fn messages(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: ANTHROPIC_MAX_TOKENS,
            messages: vec![Message::user(prompt)],
        };

        let builder = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.as_deref().unwrap_or_default())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request);

        let response: types::MessagesResponse = self.send(builder).await?;
        response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| AiError::Parse("response has no text block".into()))
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            format: "json".to_string(),
        };

        let builder = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request);

        let response: types::GenerateResponse = self.send(builder).await?;
        Ok(response.response)
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|e| {
            warn!(provider = %self.provider, error = %e, "AI request failed");
            AiError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect();
            warn!(provider = %self.provider, status = %status, "AI API error");
            return Err(AiError::Api {
                provider: self.provider.clone(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))
    }
}
