//! In-process history store backed by `DashMap`.
//!
//! DashMap shards its keys across independently locked buckets, so appends
//! for one user are mutually exclusive while unrelated users rarely contend.
//! Values are cloned on read so no `DashMap` guard outlives the call.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use chatrelay_types::chat::Turn;

use super::HistoryStore;

/// Process-wide conversation history with no persistence.
///
/// Cloning produces a shared view of the same underlying map (backed by `Arc`).
/// Constructed once at service start and dropped at shutdown.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    inner: Arc<DashMap<String, Vec<Turn>>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn get(&self, user_id: &str) -> Vec<Turn> {
        self.inner
            .get(user_id)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    fn append(&self, user_id: &str, turns: Vec<Turn>) -> usize {
        if turns.is_empty() {
            return self.inner.get(user_id).map(|r| r.len()).unwrap_or(0);
        }
        // The entry guard holds the shard's write lock until dropped, so the
        // whole batch lands contiguously.
        let mut session = self.inner.entry(user_id.to_string()).or_default();
        session.extend(turns);
        session.len()
    }

    fn clear(&self, user_id: &str) -> bool {
        self.inner.remove(user_id).is_some()
    }

    fn snapshot(&self) -> BTreeMap<String, usize> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().len()))
            .collect()
    }
}
