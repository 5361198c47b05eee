//! OpenAI chat-completions wire types.
//!
//! These are provider-specific response structures used only for parsing.
//! Requests reuse the generic `CompletionRequest`, whose serde shape already
//! matches `{model, messages, stream, temperature?, max_tokens?}`.
//!
//! Every field is optional: GLM, DeepSeek and friends all omit different
//! parts, and an `error` object can arrive even with a 2xx status.

use serde::Deserialize;

/// Body of a `/chat/completions` response (success or error).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionBody {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<ChoiceUsage>,
    /// Either `{"message": "..."}` or a bare string depending on the vendor.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatCompletionBody {
    /// Human-readable message from an `error` field, if one is present.
    pub fn error_message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        if error.is_null() {
            return None;
        }
        let message = match error {
            serde_json::Value::String(s) => s.clone(),
            other => other
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown API error")
                .to_string(),
        };
        Some(message)
    }

    /// Content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}
