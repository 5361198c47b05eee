//! Per-user conversation history.
//!
//! `HistoryStore` is the seam between the orchestrator and wherever turns
//! are kept. The only implementation today is [`memory::InMemoryHistoryStore`];
//! a persistent or shared backend would implement the same trait.

pub mod memory;

use std::collections::BTreeMap;

use chatrelay_types::chat::Turn;

pub use self::memory::InMemoryHistoryStore;

/// Ordered, append-only turn sequences keyed by user id.
///
/// All operations are synchronous and must never be held open across an
/// `.await`; callers read, release, do their remote work, then append.
pub trait HistoryStore: Send + Sync {
    /// The user's turns in chronological order; empty for unknown users.
    fn get(&self, user_id: &str) -> Vec<Turn>;

    /// Append `turns` to the end of the user's sequence as one atomic step,
    /// creating the session if absent. Returns the post-append length.
    ///
    /// Concurrent appends for the same user are serialized: each call's
    /// turns end up contiguous and in the order given.
    fn append(&self, user_id: &str, turns: Vec<Turn>) -> usize;

    /// Remove the user's session. Returns whether one existed.
    fn clear(&self, user_id: &str) -> bool;

    /// Turn count per user. Best-effort: no lock is held across the whole map.
    fn snapshot(&self) -> BTreeMap<String, usize>;
}
