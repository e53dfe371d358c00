//! Sliding window over the history sent with each relay request.
//!
//! The in-memory history is never truncated; only the copy that goes over
//! the wire is clipped, so the server-side context stays bounded. Attachments
//! travel once, with the turn that carries them, and are stripped from the
//! outgoing history.

use relaychat_types::chat::{Role, Turn};

/// How many of the most recent turns to send as history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    max_turns: Option<usize>,
}

impl HistoryWindow {
    /// Window of at most `max_turns` turns. `0` means unlimited.
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns: (max_turns > 0).then_some(max_turns),
        }
    }

    /// Send the whole history every time.
    pub fn unlimited() -> Self {
        Self { max_turns: None }
    }

    pub fn max_turns(&self) -> Option<usize> {
        self.max_turns
    }

    /// The tail of `history` that fits the window.
    ///
    /// When clipping happens, leading model turns are dropped too so the
    /// window opens on a user turn.
    pub fn clip(&self, history: &[Turn]) -> Vec<Turn> {
        let Some(max) = self.max_turns else {
            return history.to_vec();
        };
        if history.len() <= max {
            return history.to_vec();
        }

        let tail = &history[history.len() - max..];
        let start = tail
            .iter()
            .position(|t| t.role == Role::User)
            .unwrap_or(tail.len());
        tail[start..].to_vec()
    }

    /// The history to send with a request: clipped, with every attachment
    /// removed.
    pub fn outgoing(&self, history: &[Turn]) -> Vec<Turn> {
        self.clip(history)
            .into_iter()
            .map(Turn::without_attachment)
            .collect()
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(100)
    }
}
