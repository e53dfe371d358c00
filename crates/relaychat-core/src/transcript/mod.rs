//! Transcript persistence abstractions for relaychat.
//!
//! This module defines the `ChatRecordRepository` trait that the
//! infrastructure layer implements, and the `TranscriptService` the HTTP
//! handlers call.

pub mod repository;
pub mod service;
