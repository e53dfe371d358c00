//! HTTP layer for the relay server.
//!
//! Axum router under `/api` with CORS, request tracing, and plain
//! `{error}` bodies on failure.

pub mod error;
pub mod handlers;
pub mod router;
