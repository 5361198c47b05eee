//! Chat HTTP handler.
//!
//! Endpoint:
//! - POST /chat  body `{"userId"?: "...", "message": "..."}`

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::response::ChatResponse;
use crate::state::AppState;

/// Request body for a chat turn. Both fields are optional on the wire so
/// that missing values reach the service's own validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /chat - Send a message and receive the assistant's reply.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::Validation(format!("invalid request body: {}", rejection.body_text()))
    })?;

    let reply = state
        .chat_service
        .handle_chat(request.user_id.as_deref(), request.message.as_deref())
        .await?;

    Ok(Json(ChatResponse::from(reply)))
}
