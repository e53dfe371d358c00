//! Shared domain types for relaychat.
//!
//! Conversation turns, persisted chat records, the relay wire schemas,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, base64.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod wire;
