//! Axum router configuration with middleware.
//!
//! Routes are mounted at the root so existing clients keep working:
//! `/chat`, `/clearHistory`, `/history`, `/debug/conversations`, `/health`.
//! Middleware: permissive CORS, request tracing.

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::response::HealthResponse;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/clearHistory", get(handlers::history::clear_history))
        .route("/history", get(handlers::history::get_history))
        .route(
            "/debug/conversations",
            get(handlers::history::debug_conversations),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness probe, never touches the upstream.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use chatrelay_types::config::RelayConfig;

    fn state_for(server: &MockServer) -> AppState {
        let mut config = RelayConfig::default();
        config.upstream.base_url = server.uri();
        config.upstream.model = "test-model".to_string();
        AppState::init(&config, SecretString::from("test-key")).unwrap()
    }

    async fn reply_with(server: &MockServer, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cmpl-1",
                "model": "test-model",
                "choices": [{"message": {"role": "assistant", "content": content}}],
                "usage": {"prompt_tokens": 3, "completion_tokens": 2}
            })))
            .mount(server)
            .await;
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_chat(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn chat_returns_reply_and_history_count() {
        let server = MockServer::start().await;
        reply_with(&server, "hello there").await;
        let app = build_router(state_for(&server));

        let (status, body) = send(&app, post_chat(json!({"userId": "alice", "message": "hi"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "reply": "hello there", "userId": "alice", "historyCount": 2})
        );

        let (_, body) = send(&app, post_chat(json!({"userId": "alice", "message": "again"}))).await;
        assert_eq!(body["historyCount"], 4);
    }

    #[tokio::test]
    async fn chat_without_user_id_uses_anonymous() {
        let server = MockServer::start().await;
        reply_with(&server, "ok").await;
        let app = build_router(state_for(&server));

        let (status, body) = send(&app, post_chat(json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], "anonymous");
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_upstream_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let app = build_router(state_for(&server));

        let (status, body) = send(&app, post_chat(json!({"userId": "bob", "message": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "message must not be empty");
        assert!(body.get("timestamp").is_none());

        let (status, _) = send(&app, post_chat(json!({"userId": "bob"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let server = MockServer::start().await;
        let app = build_router(state_for(&server));

        let request = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn upstream_failure_is_500_and_leaves_history_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        let app = build_router(state_for(&server));

        let (status, body) = send(&app, post_chat(json!({"userId": "carol", "message": "hi"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("request failed: "));
        assert!(body["timestamp"].is_string());

        let (_, history) = send(&app, get_request("/history?userId=carol")).await;
        assert_eq!(history["historyCount"], 0);
    }

    #[tokio::test]
    async fn clear_history_reports_whether_history_existed() {
        let server = MockServer::start().await;
        reply_with(&server, "ok").await;
        let app = build_router(state_for(&server));

        send(&app, post_chat(json!({"userId": "dave", "message": "hi"}))).await;

        let (status, body) = send(&app, get_request("/clearHistory?userId=dave")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&app, get_request("/clearHistory?userId=dave")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, get_request("/clearHistory")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn history_lists_turns_in_order() {
        let server = MockServer::start().await;
        reply_with(&server, "pong").await;
        let app = build_router(state_for(&server));

        send(&app, post_chat(json!({"userId": "erin", "message": "ping"}))).await;

        let (status, body) = send(&app, get_request("/history?userId=erin")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], "erin");
        assert_eq!(
            body["turns"],
            json!([
                {"role": "user", "content": "ping"},
                {"role": "assistant", "content": "pong"}
            ])
        );
    }

    #[tokio::test]
    async fn debug_snapshot_counts_users() {
        let server = MockServer::start().await;
        reply_with(&server, "ok").await;
        let app = build_router(state_for(&server));

        send(&app, post_chat(json!({"userId": "a", "message": "1"}))).await;
        send(&app, post_chat(json!({"userId": "a", "message": "2"}))).await;
        send(&app, post_chat(json!({"userId": "b", "message": "1"}))).await;

        let (status, body) = send(&app, get_request("/debug/conversations")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalUsers"], 2);
        assert_eq!(body["historyByUser"], json!({"a": 4, "b": 2}));
        assert!(body["serverTime"].is_string());
    }

    #[tokio::test]
    async fn health_check_is_ok() {
        let server = MockServer::start().await;
        let app = build_router(state_for(&server));

        let (status, body) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
