//! Rendering seam for the conversation state machine.
//!
//! The state machine decides *what* to show; a `ChatView` decides *how*.
//! The terminal client implements it with styled console output; tests
//! implement it by recording calls.

use relaychat_types::chat::{Attachment, Turn};

/// Identifies one bot placeholder for the lifetime of its round trip.
pub type PlaceholderId = u64;

/// Fixed text shown in place of a bot reply when the relay call fails.
pub const REPLY_ERROR_TEXT: &str = "Error getting response";

/// Receives every visible change the conversation makes.
///
/// Methods are synchronous: rendering never waits on the network.
pub trait ChatView: Send + Sync {
    /// A user turn was appended and should appear immediately.
    fn render_user_turn(&self, turn: &Turn);

    /// A bot placeholder enters the awaiting-reply state.
    fn render_placeholder(&self, id: PlaceholderId);

    /// The placeholder's content becomes the (trimmed) reply text.
    fn resolve_placeholder(&self, id: PlaceholderId, text: &str);

    /// The placeholder shows an error message in error style.
    fn fail_placeholder(&self, id: PlaceholderId, message: &str);

    /// Thinking styling is removed and the view scrolls to the latest message.
    fn finalize_placeholder(&self, id: PlaceholderId);

    /// The pending attachment was set (`Some`) or cleared (`None`).
    fn attachment_changed(&self, attachment: Option<&Attachment>);
}
