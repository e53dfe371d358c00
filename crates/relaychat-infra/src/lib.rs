//! Infrastructure layer for relaychat.
//!
//! Contains implementations of the traits defined in `relaychat-core`:
//! SQLite transcript storage, the Gemini generative model, the HTTP client
//! the terminal chat uses to reach the relay, and configuration loading.

pub mod client;
pub mod config;
pub mod llm;
pub mod sqlite;
