//! LlmProvider trait definition.
//!
//! Uses native async fn in traits (RPITIT) for `complete`, so providers are
//! used through generics rather than trait objects.

use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for upstream chat-completion backends.
///
/// Implementations live in chatrelay-infra (e.g., `OpenAiCompatibleProvider`).
/// Callers bound the call with their own timeout; implementations may
/// additionally enforce a transport-level one.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name used in logs (e.g., "openai_compatible").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
