//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves any endpoint that speaks the
//! OpenAI `/chat/completions` protocol (Zhipu GLM, DeepSeek, OpenAI, ...)
//! via a configurable base URL. Non-streaming only.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

pub mod config;
pub mod types;

use secrecy::{ExposeSecret, SecretString};

use chatrelay_core::llm::provider::LlmProvider;
use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use self::config::OpenAiCompatConfig;
use self::types::ChatCompletionBody;

/// Unified provider for any OpenAI-compatible API.
///
/// # API Key Security
///
/// Does NOT derive Debug; the key lives in a [`SecretString`] and never
/// appears in Debug output, Display output, or tracing logs.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    provider_name: String,
    base_url: String,
    api_key: SecretString,
    timeout_secs: u64,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Provider`] if the HTTP client cannot be built
    /// (e.g., TLS backend initialization failure).
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            provider_name: config.provider_name,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Map a transport-level reqwest failure.
    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else {
            LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            }
        }
    }
}

/// Turn a status code and raw body into a response or a typed error.
///
/// An explicit `error` payload wins over the status code, except for 401
/// and 429 which map to their dedicated variants.
fn parse_completion(status: reqwest::StatusCode, body: &str) -> Result<CompletionResponse, LlmError> {
    match status.as_u16() {
        401 => return Err(LlmError::AuthenticationFailed),
        429 => return Err(LlmError::RateLimited),
        _ => {}
    }

    let parsed = serde_json::from_str::<ChatCompletionBody>(body);

    if let Ok(ref parsed) = parsed {
        if let Some(message) = parsed.error_message() {
            return Err(LlmError::Api { message });
        }
    }

    if !status.is_success() {
        return Err(LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        });
    }

    let parsed = parsed
        .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

    let content = parsed.first_content().ok_or(LlmError::NoReply)?.to_string();

    let usage = parsed
        .usage
        .map(|u| Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        id: parsed.id,
        content,
        model: parsed.model.unwrap_or_default(),
        usage,
    })
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut body = request.clone();
        body.stream = false;

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        tracing::debug!(
            provider = %self.provider_name,
            status = status.as_u16(),
            bytes = text.len(),
            "Upstream responded"
        );

        parse_completion(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chatrelay_types::chat::Turn;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(base_url: &str, timeout: Duration) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: "test".to_string(),
            base_url: base_url.to_string(),
            api_key: SecretString::from("test-key"),
            timeout,
        })
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(
            "glm-4-flash",
            vec![Turn::user("a"), Turn::assistant("b"), Turn::user("c")],
        )
    }

    #[test]
    fn completions_url_strips_trailing_slash() {
        let provider = provider_for("http://example.test/v4/", Duration::from_secs(5));
        assert_eq!(provider.completions_url(), "http://example.test/v4/chat/completions");
    }

    #[test]
    fn parse_success() {
        let resp = parse_completion(
            StatusCode::OK,
            r#"{"id":"x","model":"m","choices":[{"message":{"content":"hey"}}],"usage":{"prompt_tokens":1,"completion_tokens":2}}"#,
        )
        .unwrap();
        assert_eq!(resp.content, "hey");
        assert_eq!(resp.usage.output_tokens, 2);
        assert_eq!(resp.id.as_deref(), Some("x"));
    }

    #[test]
    fn parse_error_payload_with_ok_status() {
        let err = parse_completion(StatusCode::OK, r#"{"error":{"message":"model not found"}}"#)
            .unwrap_err();
        assert!(matches!(err, LlmError::Api { message } if message == "model not found"));
    }

    #[test]
    fn parse_status_mappings() {
        assert!(matches!(
            parse_completion(StatusCode::UNAUTHORIZED, "{}"),
            Err(LlmError::AuthenticationFailed)
        ));
        assert!(matches!(
            parse_completion(StatusCode::TOO_MANY_REQUESTS, ""),
            Err(LlmError::RateLimited)
        ));
        assert!(matches!(
            parse_completion(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            Err(LlmError::Provider { message }) if message.contains("502")
        ));
    }

    #[test]
    fn parse_malformed_and_empty() {
        assert!(matches!(
            parse_completion(StatusCode::OK, "not json"),
            Err(LlmError::Deserialization(_))
        ));
        assert!(matches!(
            parse_completion(StatusCode::OK, r#"{"choices":[]}"#),
            Err(LlmError::NoReply)
        ));
    }

    #[tokio::test]
    async fn complete_sends_openai_wire_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(json!({
                "model": "glm-4-flash",
                "messages": [
                    {"role": "user", "content": "a"},
                    {"role": "assistant", "content": "b"},
                    {"role": "user", "content": "c"}
                ],
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cmpl-1",
                "model": "glm-4-flash",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "d"}}],
                "usage": {"prompt_tokens": 9, "completion_tokens": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), Duration::from_secs(5));
        let resp = provider.complete(&request()).await.unwrap();
        assert_eq!(resp.content, "d");
        assert_eq!(resp.usage.input_tokens, 9);
    }

    #[tokio::test]
    async fn complete_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), Duration::from_secs(5));
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Provider { message } if message.contains("boom")));
    }

    #[tokio::test]
    async fn complete_maps_error_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": {"message": "invalid messages"}})),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), Duration::from_secs(5));
        let err = provider.complete(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "upstream returned an error: invalid messages");
    }

    #[tokio::test]
    async fn complete_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(json!({"choices": [{"message": {"content": "late"}}]})),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), Duration::from_millis(200));
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Timeout(_)));
    }

    #[tokio::test]
    async fn complete_connection_refused_is_provider_error() {
        // Port 9 (discard) on localhost is not expected to be listening.
        let provider = provider_for("http://127.0.0.1:9", Duration::from_secs(2));
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. } | LlmError::Timeout(_)));
    }
}
