//! History inspection and management handlers.
//!
//! Endpoints:
//! - GET /clearHistory?userId=...   - Drop a user's stored history
//! - GET /history?userId=...        - Read a user's stored turns
//! - GET /debug/conversations       - Per-user turn counts

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::response::{ClearResponse, DebugSnapshotResponse, HistoryResponse};
use crate::state::AppState;

/// Query parameters naming a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// GET /clearHistory - Remove a user's session.
///
/// Clearing an unknown user is not an error: the body reports
/// `success: false` with a 200 status.
pub async fn clear_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ClearResponse>, AppError> {
    let user_id = query
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;

    let existed = state.chat_service.clear_history(user_id);
    Ok(Json(ClearResponse::for_outcome(user_id, existed)))
}

/// GET /history - Stored turns for a user (anonymous user if none given).
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<HistoryResponse> {
    let user_id = state.chat_service.resolve_user_id(query.user_id.as_deref());
    let turns = state.chat_service.history(&user_id);

    Json(HistoryResponse {
        history_count: turns.len(),
        user_id,
        turns,
    })
}

/// GET /debug/conversations - Per-user turn counts.
pub async fn debug_conversations(State(state): State<AppState>) -> Json<DebugSnapshotResponse> {
    Json(DebugSnapshotResponse::from(state.chat_service.debug_snapshot()))
}
