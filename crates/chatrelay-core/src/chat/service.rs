//! Chat service orchestrating history reads, upstream calls, and commits.
//!
//! ChatService coordinates between a `HistoryStore` and an `LlmProvider`:
//! it reads the user's history, builds the context window, calls upstream
//! without holding any store lock, and appends the user/assistant pair only
//! when a usable reply came back.

use std::collections::BTreeMap;
use std::time::Duration;

use chatrelay_types::chat::{ChatReply, HistorySnapshot, Turn};
use chatrelay_types::config::RelayConfig;
use chatrelay_types::error::ChatError;
use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::chat::window::{DEFAULT_WINDOW_SIZE, build_context_window};
use crate::history::HistoryStore;
use crate::llm::provider::LlmProvider;

/// Per-request knobs for `ChatService`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Model name sent upstream.
    pub model: String,
    /// Stored turns included ahead of the new message.
    pub window_size: usize,
    /// User id used when a request carries none.
    pub anonymous_user: String,
    /// Upper bound on one upstream call.
    pub upstream_timeout: Duration,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ChatSettings {
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            model: config.upstream.model.clone(),
            window_size: config.history.window_size,
            anonymous_user: config.history.anonymous_user.clone(),
            upstream_timeout: Duration::from_secs(config.upstream.timeout_secs),
            temperature: config.upstream.temperature,
            max_tokens: config.upstream.max_tokens,
        }
    }

    /// Settings with the given model and otherwise default values.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            window_size: DEFAULT_WINDOW_SIZE,
            ..Self::default()
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self::from_config(&RelayConfig::default())
    }
}

/// Orchestrates one chat exchange per call.
///
/// Generic over `HistoryStore` and `LlmProvider` to maintain clean
/// architecture (chatrelay-core never depends on chatrelay-infra). Holds no
/// state of its own between calls.
pub struct ChatService<H: HistoryStore, P: LlmProvider> {
    store: H,
    provider: P,
    settings: ChatSettings,
}

impl<H: HistoryStore, P: LlmProvider> ChatService<H, P> {
    /// Create a new chat service over the given store and provider.
    pub fn new(store: H, provider: P, settings: ChatSettings) -> Self {
        Self {
            store,
            provider,
            settings,
        }
    }

    /// Access the history store.
    pub fn store(&self) -> &H {
        &self.store
    }

    /// Access the upstream provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve the effective user id: trimmed, or the anonymous id if blank.
    pub fn resolve_user_id(&self, user_id: Option<&str>) -> String {
        match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.settings.anonymous_user.clone(),
        }
    }

    /// Run one chat exchange for `user_id`.
    ///
    /// On success the store holds the user turn followed by the assistant
    /// turn, appended in a single call. On any failure the store is left
    /// exactly as it was.
    pub async fn handle_chat(
        &self,
        user_id: Option<&str>,
        message: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        let user_id = self.resolve_user_id(user_id);

        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => {
                debug!(user_id = %user_id, "Rejected chat request with empty message");
                return Err(ChatError::InvalidInput(
                    "message must not be empty".to_string(),
                ));
            }
        };

        let history = self.store.get(&user_id);
        let messages = build_context_window(&history, message, self.settings.window_size);
        debug!(
            user_id = %user_id,
            stored_turns = history.len(),
            window_len = messages.len(),
            "Built context window"
        );

        let response = self
            .complete_bounded(messages)
            .await
            .map_err(|e| {
                warn!(user_id = %user_id, error = %e, "Upstream completion failed");
                ChatError::Upstream(e.to_string())
            })?;

        let reply = response.content;
        if reply.trim().is_empty() {
            warn!(user_id = %user_id, "Upstream returned an empty reply");
            return Err(ChatError::Upstream(LlmError::NoReply.to_string()));
        }

        let history_count = self.store.append(
            &user_id,
            vec![Turn::user(message), Turn::assistant(reply.clone())],
        );

        info!(
            user_id = %user_id,
            history_count,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Chat exchange committed"
        );

        Ok(ChatReply {
            reply,
            user_id,
            history_count,
        })
    }

    /// Remove a user's stored history. Returns whether any existed.
    pub fn clear_history(&self, user_id: &str) -> bool {
        let existed = self.store.clear(user_id);
        info!(user_id = %user_id, existed, "Cleared history");
        existed
    }

    /// The user's stored turns, oldest first.
    pub fn history(&self, user_id: &str) -> Vec<Turn> {
        self.store.get(user_id)
    }

    /// Per-user turn counts with the user total.
    pub fn debug_snapshot(&self) -> HistorySnapshot {
        let counts: BTreeMap<String, usize> = self.store.snapshot();
        HistorySnapshot::from_counts(counts)
    }

    /// Send `messages` upstream, bounded by the configured timeout.
    async fn complete_bounded(&self, messages: Vec<Turn>) -> Result<CompletionResponse, LlmError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            stream: false,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.messages = request.messages.len(),
        );

        let timeout = self.settings.upstream_timeout;
        match tokio::time::timeout(timeout, self.provider.complete(&request).instrument(span)).await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(timeout.as_secs())),
        }
    }
}
