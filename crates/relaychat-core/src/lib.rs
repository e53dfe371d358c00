//! Business logic and trait definitions for relaychat.
//!
//! This crate defines the "ports" (model, repository, relay-client, and view
//! traits) that the infrastructure and application layers implement. It
//! depends only on `relaychat-types` -- never on `relaychat-infra` or any
//! database/HTTP crate.

pub mod chat;
pub mod llm;
pub mod relay;
pub mod transcript;
