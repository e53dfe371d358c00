//! Client-side conversation logic.
//!
//! `Conversation` drives the submission state machine over three seams:
//! a [`client::RelayClient`] for replies, a [`client::TranscriptSink`] fed
//! through the [`persistence::PersistenceQueue`], and a [`view::ChatView`]
//! for rendering.

pub mod client;
pub mod conversation;
pub mod persistence;
pub mod session;
pub mod view;
pub mod window;
