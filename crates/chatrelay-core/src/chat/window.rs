//! Context window assembly.
//!
//! The window is a per-request view: the most recent `window_size` stored
//! turns followed by the new user message. Stored history is never trimmed.
//! The bound is a turn count, not a token budget.

use chatrelay_types::chat::Turn;

/// Stored turns sent with each message by default (three exchanges).
pub const DEFAULT_WINDOW_SIZE: usize = 6;

/// Build the message list for one upstream request.
///
/// Returns the last `min(history.len(), window_size)` turns of `history` in
/// their original order, with `Turn::user(message)` appended. The caller is
/// responsible for rejecting blank messages before calling this.
pub fn build_context_window(history: &[Turn], message: &str, window_size: usize) -> Vec<Turn> {
    let start = history.len().saturating_sub(window_size);
    let mut window = Vec::with_capacity(history.len() - start + 1);
    window.extend_from_slice(&history[start..]);
    window.push(Turn::user(message));
    window
}
