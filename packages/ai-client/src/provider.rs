//! Built-in provider defaults.
//!
//! Each provider is plain data: the wire format to speak, the default endpoint and the
//! default model. Anything not in the table is assumed to speak the OpenAI-compatible
//! format at a caller-supplied base URL.

use serde::{Deserialize, Serialize};

/// Request/response shape a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFormat {
    /// `POST {base}/chat/completions`
    OpenAI,
    /// `POST {base}/v1/messages`
    Anthropic,
    /// `POST {base}/api/generate`
    Local,
}

impl ApiFormat {
    /// Bookmarks per classification request. Local models get smaller batches.
    pub fn default_batch_size(self) -> usize {
        match self {
            Self::Local => 10,
            Self::OpenAI | Self::Anthropic => 20,
        }
    }

    /// Whether the format is served without an API key.
    pub fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSpec {
    pub name: &'static str,
    pub format: ApiFormat,
    pub base_url: &'static str,
    pub model: &'static str,
}

const fn spec(
    name: &'static str,
    format: ApiFormat,
    base_url: &'static str,
    model: &'static str,
) -> ProviderSpec {
    ProviderSpec {
        name,
        format,
        base_url,
        model,
    }
}

pub const PROVIDERS: &[ProviderSpec] = &[
    spec("claude", ApiFormat::Anthropic, "https://api.anthropic.com", "claude-sonnet-4-5-20250514"),
    spec("openai", ApiFormat::OpenAI, "https://api.openai.com/v1", "gpt-4o-mini"),
    spec("ollama", ApiFormat::Local, "http://localhost:11434", "llama3.2"),
    spec("deepseek", ApiFormat::OpenAI, "https://api.deepseek.com/v1", "deepseek-chat"),
    spec("gemini", ApiFormat::OpenAI, "https://generativelanguage.googleapis.com/v1beta/openai", "gemini-2.0-flash"),
    spec("moonshot", ApiFormat::OpenAI, "https://api.moonshot.cn/v1", "moonshot-v1-8k"),
    spec("qwen", ApiFormat::OpenAI, "https://dashscope.aliyuncs.com/compatible-mode/v1", "qwen-turbo"),
    spec("zhipu", ApiFormat::OpenAI, "https://open.bigmodel.cn/api/paas/v4", "glm-4-flash"),
    spec("groq", ApiFormat::OpenAI, "https://api.groq.com/openai/v1", "llama-3.1-8b-instant"),
    spec("mistral", ApiFormat::OpenAI, "https://api.mistral.ai/v1", "mistral-small-latest"),
    spec("together", ApiFormat::OpenAI, "https://api.together.xyz/v1", "meta-llama/Llama-3-8b-chat-hf"),
    spec("xai", ApiFormat::OpenAI, "https://api.x.ai/v1", "grok-2-latest"),
    spec("openrouter", ApiFormat::OpenAI, "https://openrouter.ai/api/v1", "meta-llama/llama-3-8b-instruct"),
    spec("siliconflow", ApiFormat::OpenAI, "https://api.siliconflow.cn/v1", "Qwen/Qwen2.5-7B-Instruct"),
    spec("fireworks", ApiFormat::OpenAI, "https://api.fireworks.ai/inference/v1", "accounts/fireworks/models/llama-v3p1-8b-instruct"),
    spec("cohere", ApiFormat::OpenAI, "https://api.cohere.ai/compatibility/v1", "command-r"),
    spec("deepinfra", ApiFormat::OpenAI, "https://api.deepinfra.com/v1/openai", "meta-llama/Meta-Llama-3-8B-Instruct"),
    spec("perplexity", ApiFormat::OpenAI, "https://api.perplexity.ai", "llama-3.1-sonar-small-128k-online"),
];

/// Look up a built-in provider by name (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Names of every built-in provider, in table order.
pub fn provider_names() -> impl Iterator<Item = &'static str> {
    PROVIDERS.iter().map(|p| p.name)
}
