//! Conversation state machine.
//!
//! Sequences one submission: optimistic user render, queued save, cosmetic
//! thinking delay, placeholder, relay call, and reply or error render.
//!
//! `submit` takes `&self`, so several submissions can be in flight at once;
//! each owns its own placeholder and they finish in whatever order the relay
//! answers. Session state sits behind a mutex that is only held for the
//! synchronous steps, never across an await.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use relaychat_types::chat::{Attachment, NewChatRecord, Turn};
use relaychat_types::config::ClientConfig;
use relaychat_types::wire::ChatRequest;
use tracing::{debug, error};
use uuid::Uuid;

use crate::chat::client::RelayClient;
use crate::chat::persistence::{PersistenceQueue, SaveHandle};
use crate::chat::session::ChatSession;
use crate::chat::view::{ChatView, PlaceholderId, REPLY_ERROR_TEXT};
use crate::chat::window::HistoryWindow;

/// Tunables for a conversation.
#[derive(Debug, Clone, Copy)]
pub struct ConversationConfig {
    /// Pause between the user render and the placeholder. Cosmetic only.
    pub thinking_delay: Duration,
    /// Clipping applied to the history sent with each request.
    pub window: HistoryWindow,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            thinking_delay: Duration::from_millis(600),
            window: HistoryWindow::default(),
        }
    }
}

impl From<&ClientConfig> for ConversationConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            thinking_delay: Duration::from_millis(config.thinking_delay_ms),
            window: HistoryWindow::new(config.history_window),
        }
    }
}

/// How a bot placeholder ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The relay answered; the model turn was appended to history.
    Replied(Turn),
    /// The relay call failed; history was left alone.
    Failed(String),
}

/// Everything one accepted submission produced.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub placeholder: PlaceholderId,
    pub user_turn: Turn,
    pub reply: ReplyOutcome,
    /// Save handles for the user turn and, on success, the model turn.
    pub saves: Vec<SaveHandle>,
}

/// A single conversation thread driving a view and a relay client.
pub struct Conversation<R: RelayClient, V: ChatView> {
    session: Mutex<ChatSession>,
    relay: R,
    view: V,
    persistence: PersistenceQueue,
    config: ConversationConfig,
}

impl<R: RelayClient, V: ChatView> Conversation<R, V> {
    pub fn new(relay: R, view: V, persistence: PersistenceQueue, config: ConversationConfig) -> Self {
        Self {
            session: Mutex::new(ChatSession::new()),
            relay,
            view,
            persistence,
            config,
        }
    }

    /// Identifier of the underlying session, for display and logging.
    pub fn session_id(&self) -> Uuid {
        self.session().id()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    pub fn persistence(&self) -> &PersistenceQueue {
        &self.persistence
    }

    /// Snapshot of the turn history.
    pub fn history(&self) -> Vec<Turn> {
        self.session().history().to_vec()
    }

    pub fn pending_attachment(&self) -> Option<Attachment> {
        self.session().pending_attachment().cloned()
    }

    /// Hold an attachment for the next outgoing turn, replacing any other.
    pub fn attach(&self, attachment: Attachment) {
        self.view.attachment_changed(Some(&attachment));
        self.session().set_attachment(attachment);
    }

    /// Drop the pending attachment, if any.
    pub fn cancel_attachment(&self) {
        if self.session().clear_attachment() {
            self.view.attachment_changed(None);
        }
    }

    /// Submit user input and drive it through to a rendered reply.
    ///
    /// Returns `None` without side effects when the trimmed text is empty and
    /// no attachment is pending. The user turn is appended and rendered
    /// before any network call is made.
    pub async fn submit(&self, text: &str) -> Option<SubmitOutcome> {
        let outgoing = self.session().begin_turn(text)?;

        self.view.render_user_turn(&outgoing.turn);
        if outgoing.turn.attachment.is_some() {
            self.view.attachment_changed(None);
        }
        let mut saves = vec![self.persistence.enqueue(NewChatRecord::from(&outgoing.turn))];

        let request = ChatRequest {
            message: outgoing.turn.text.clone(),
            history: self.config.window.outgoing(&outgoing.prior_history),
            attachment: outgoing.turn.attachment.clone(),
        };

        if !self.config.thinking_delay.is_zero() {
            tokio::time::sleep(self.config.thinking_delay).await;
        }

        let placeholder = self.session().next_placeholder();
        self.view.render_placeholder(placeholder);
        debug!(placeholder, history = request.history.len(), "Awaiting relay reply");

        let reply = match self.relay.send_chat(&request).await {
            Ok(reply) => {
                let text = reply.reply.trim().to_string();
                self.view.resolve_placeholder(placeholder, &text);
                let turn = self.session().record_reply(text);
                saves.push(self.persistence.enqueue(NewChatRecord::from(&turn)));
                ReplyOutcome::Replied(turn)
            }
            Err(e) => {
                error!(placeholder, error = %e, "Relay request failed");
                self.view.fail_placeholder(placeholder, REPLY_ERROR_TEXT);
                ReplyOutcome::Failed(e.to_string())
            }
        };

        self.finalize(placeholder);

        Some(SubmitOutcome {
            placeholder,
            user_turn: outgoing.turn,
            reply,
            saves,
        })
    }

    fn finalize(&self, placeholder: PlaceholderId) {
        if self.session().clear_attachment() {
            self.view.attachment_changed(None);
        }
        self.view.finalize_placeholder(placeholder);
    }

    fn session(&self) -> MutexGuard<'_, ChatSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
