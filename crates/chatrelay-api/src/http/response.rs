//! Response bodies for all API endpoints.
//!
//! Field names are camelCase on the wire:
//! ```json
//! { "success": true, "reply": "...", "userId": "alice", "historyCount": 4 }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use chatrelay_types::chat::{ChatReply, HistorySnapshot, Turn};

/// Successful `POST /chat` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
    pub user_id: String,
    pub history_count: usize,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            success: true,
            reply: reply.reply,
            user_id: reply.user_id,
            history_count: reply.history_count,
        }
    }
}

/// Failure body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
    /// Present on server-side failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// `GET /clearHistory` body. A missing session is `success: false`, still 200.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
}

impl ClearResponse {
    pub fn for_outcome(user_id: &str, existed: bool) -> Self {
        if existed {
            Self {
                success: true,
                message: format!("history for user '{user_id}' cleared"),
            }
        } else {
            Self {
                success: false,
                message: format!("no history found for user '{user_id}'"),
            }
        }
    }
}

/// `GET /history` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub user_id: String,
    pub history_count: usize,
    pub turns: Vec<Turn>,
}

/// `GET /debug/conversations` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSnapshotResponse {
    pub total_users: usize,
    pub history_by_user: BTreeMap<String, usize>,
    pub server_time: String,
}

impl From<HistorySnapshot> for DebugSnapshotResponse {
    fn from(snapshot: HistorySnapshot) -> Self {
        Self {
            total_users: snapshot.total_users,
            history_by_user: snapshot.per_user_counts,
            server_time: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// `GET /health` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub server_time: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            server_time: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_uses_camel_case() {
        let body = ChatResponse::from(ChatReply {
            reply: "hi".to_string(),
            user_id: "u".to_string(),
            history_count: 2,
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "reply": "hi", "userId": "u", "historyCount": 2})
        );
    }

    #[test]
    fn failure_omits_missing_timestamp() {
        let body = FailureResponse {
            success: false,
            message: "bad".to_string(),
            timestamp: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn clear_response_outcomes() {
        assert!(ClearResponse::for_outcome("u", true).success);
        let missing = ClearResponse::for_outcome("u", false);
        assert!(!missing.success);
        assert!(missing.message.contains("'u'"));
    }
}
