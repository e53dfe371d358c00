//! Per-conversation client state.
//!
//! Holds the turn history, the pending attachment buffer, and the
//! placeholder counter for one conversation. Every transition here is
//! synchronous; the async sequencing lives in `Conversation`.

use chrono::{DateTime, Utc};
use relaychat_types::chat::{Attachment, Turn};
use uuid::Uuid;

use crate::chat::view::PlaceholderId;

/// A user turn accepted by [`ChatSession::begin_turn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingTurn {
    /// History as it was before `turn` was appended.
    pub prior_history: Vec<Turn>,
    /// The user turn that was just appended.
    pub turn: Turn,
}

/// State of a single conversation thread.
#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    history: Vec<Turn>,
    pending_attachment: Option<Attachment>,
    next_placeholder: PlaceholderId,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            history: Vec::new(),
            pending_attachment: None,
            next_placeholder: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Turns in append order.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn pending_attachment(&self) -> Option<&Attachment> {
        self.pending_attachment.as_ref()
    }

    /// Replace the pending attachment. At most one is held.
    pub fn set_attachment(&mut self, attachment: Attachment) {
        self.pending_attachment = Some(attachment);
    }

    /// Drop the pending attachment, returning whether one was held.
    pub fn clear_attachment(&mut self) -> bool {
        self.pending_attachment.take().is_some()
    }

    /// Accept a user submission.
    ///
    /// Returns `None` (and changes nothing) when the trimmed text is empty
    /// and no attachment is pending. Otherwise appends exactly one user turn
    /// carrying the pending attachment, and consumes that attachment.
    pub fn begin_turn(&mut self, text: &str) -> Option<OutgoingTurn> {
        let text = text.trim();
        if text.is_empty() && self.pending_attachment.is_none() {
            return None;
        }

        let prior_history = self.history.clone();
        let turn = Turn::user(text).with_attachment(self.pending_attachment.take());
        self.history.push(turn.clone());

        Some(OutgoingTurn {
            prior_history,
            turn,
        })
    }

    /// Append the model's reply to the history.
    pub fn record_reply(&mut self, text: impl Into<String>) -> Turn {
        let turn = Turn::model(text);
        self.history.push(turn.clone());
        turn
    }

    /// Allocate the id for the next bot placeholder.
    pub fn next_placeholder(&mut self) -> PlaceholderId {
        let id = self.next_placeholder;
        self.next_placeholder += 1;
        id
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
