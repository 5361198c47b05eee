//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined in
//! `chatrelay-core`, plus a connection test ([`test_provider_connection`])
//! used by `chatrelay check`.
//!
//! [`LlmProvider`]: chatrelay_core::llm::provider::LlmProvider

pub mod openai_compat;

use chatrelay_core::llm::provider::LlmProvider;
use chatrelay_types::chat::Turn;
use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};

pub use self::openai_compat::OpenAiCompatibleProvider;

/// Test provider connectivity by sending a minimal completion request.
///
/// Sends a tiny "Hello" message with a small token budget to verify the API
/// key and endpoint are working.
pub async fn test_provider_connection<P: LlmProvider>(
    provider: &P,
    model: &str,
) -> Result<CompletionResponse, LlmError> {
    let mut request = CompletionRequest::new(model, vec![Turn::user("Hello")]);
    request.max_tokens = Some(16);
    request.temperature = Some(0.0);
    provider.complete(&request).await
}
