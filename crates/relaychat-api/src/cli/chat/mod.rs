//! Interactive terminal chat against a running relay.
//!
//! Drives the conversation state machine from `relaychat-core` with a
//! console view, slash commands, and non-blocking submissions.
//! Entry point: `loop_runner::run_chat_loop`.

pub mod attach;
pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod view;
