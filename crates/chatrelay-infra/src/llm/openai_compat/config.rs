//! Connection settings for an OpenAI-compatible provider.

use std::time::Duration;

use secrecy::SecretString;

use chatrelay_types::config::UpstreamConfig;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`]. Does not derive
/// Debug so the API key cannot leak through formatting.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name used in logs.
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://open.bigmodel.cn/api/paas/v4").
    pub base_url: String,
    /// Bearer credential.
    pub api_key: SecretString,
    /// Transport-level timeout for one request.
    pub timeout: Duration,
}

impl OpenAiCompatConfig {
    /// Build provider settings from the `[upstream]` config section and a
    /// resolved API key.
    pub fn from_upstream(upstream: &UpstreamConfig, api_key: SecretString) -> Self {
        Self {
            provider_name: "openai_compatible".into(),
            base_url: upstream.base_url.clone(),
            api_key,
            timeout: Duration::from_secs(upstream.timeout_secs),
        }
    }
}
