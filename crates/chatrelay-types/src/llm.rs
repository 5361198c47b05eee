//! LLM request/response types for chatrelay.
//!
//! These types model the provider-agnostic data shapes for a single
//! non-streaming chat completion: the request sent upstream, the parsed
//! response, token usage, and provider errors.

use serde::{Deserialize, Serialize};

use crate::chat::Turn;

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    #[serde(default)]
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// A non-streaming request with no sampling overrides.
    pub fn new(model: impl Into<String>, messages: Vec<Turn>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: false,
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: Option<String>,
    pub content: String,
    pub model: String,
    pub usage: Usage,
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("upstream returned an error: {message}")]
    Api { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited by upstream")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("upstream timed out after {0}s")]
    Timeout(u64),

    #[error("no reply in upstream response")]
    NoReply,
}
