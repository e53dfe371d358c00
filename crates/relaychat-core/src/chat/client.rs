//! Client-side ports to the relay server.
//!
//! The conversation talks to the relay through these two traits: one call
//! that gates the bot reply, and one save call whose outcome the
//! conversation never waits on.

use relaychat_types::chat::NewChatRecord;
use relaychat_types::error::ClientError;
use relaychat_types::wire::{ChatReply, ChatRequest};

/// Sends a chat request to the relay and returns its reply.
///
/// Implementations live in relaychat-infra (e.g., `HttpRelayClient`).
pub trait RelayClient: Send + Sync {
    fn send_chat(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatReply, ClientError>> + Send;
}

/// Persists one transcript record through the relay.
pub trait TranscriptSink: Send + Sync {
    fn save(
        &self,
        record: &NewChatRecord,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;
}
