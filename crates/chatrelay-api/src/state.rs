//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! `ChatService` is generic over store/provider traits, but AppState pins it
//! to the in-memory store and the OpenAI-compatible HTTP provider.

use std::sync::Arc;

use secrecy::SecretString;

use chatrelay_core::chat::service::{ChatService, ChatSettings};
use chatrelay_core::history::InMemoryHistoryStore;
use chatrelay_infra::llm::OpenAiCompatibleProvider;
use chatrelay_infra::llm::openai_compat::config::OpenAiCompatConfig;
use chatrelay_types::config::RelayConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<InMemoryHistoryStore, OpenAiCompatibleProvider>;

/// Shared application state holding all services.
///
/// Cloned into every request handler; the history store inside is shared.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Wire the provider and an empty history store from configuration.
    pub fn init(config: &RelayConfig, api_key: SecretString) -> anyhow::Result<Self> {
        let provider =
            OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_upstream(&config.upstream, api_key))?;

        let chat_service = ChatService::new(
            InMemoryHistoryStore::new(),
            provider,
            ChatSettings::from_config(config),
        );

        tracing::info!(
            base_url = %config.upstream.base_url,
            model = %config.upstream.model,
            window_size = config.history.window_size,
            "Chat service initialized"
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
        })
    }
}
