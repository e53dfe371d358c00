//! GenerativeModel trait definition.
//!
//! This is the core abstraction every upstream generative-language API
//! implements. Uses RPITIT for `generate`, so it is not object-safe on its
//! own; see [`BoxGenerativeModel`](super::box_provider::BoxGenerativeModel).

use relaychat_types::chat::Turn;
use relaychat_types::llm::{Generation, LlmError};

/// Trait for generative-language backends (Gemini, test doubles, ...).
///
/// Implementations live in relaychat-infra (e.g., `GeminiModel`).
pub trait GenerativeModel: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Send the full content list and return the first candidate's text.
    ///
    /// `contents` is ordered oldest first; the last entry is the new user turn.
    fn generate(
        &self,
        contents: &[Turn],
    ) -> impl std::future::Future<Output = Result<Generation, LlmError>> + Send;
}
