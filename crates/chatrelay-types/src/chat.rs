//! Conversation turn and session-view types for chatrelay.
//!
//! A `Turn` is one message in a user's conversation. The ordered list of
//! turns for one user id is that user's session; sessions live in the
//! history store (see `chatrelay-core::history`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message exchanged in a conversation.
///
/// Turns are immutable once created: fields are private and only readable
/// through accessors. Serializes as `{"role": "...", "content": "..."}`, which
/// is also the upstream chat-completion message shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// A turn spoken by the end user.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// A turn produced by the upstream model.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Successful outcome of one chat exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// Assistant reply text as returned upstream.
    pub reply: String,
    /// The resolved user id (anonymous id substituted when none was given).
    pub user_id: String,
    /// Number of stored turns for the user after this exchange was committed.
    pub history_count: usize,
}

/// Read-only diagnostic view over all sessions.
///
/// Built from a best-effort walk of the store; counts for different users
/// may reflect slightly different instants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySnapshot {
    pub total_users: usize,
    pub per_user_counts: BTreeMap<String, usize>,
}

impl HistorySnapshot {
    pub fn from_counts(per_user_counts: BTreeMap<String, usize>) -> Self {
        Self {
            total_users: per_user_counts.len(),
            per_user_counts,
        }
    }
}
