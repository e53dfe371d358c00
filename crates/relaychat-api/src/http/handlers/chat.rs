//! Chat relay endpoint.
//!
//! POST /api/chat
//!
//! Forwards `{message, history, attachment?}` to the generative model and
//! answers `{reply}`. Upstream failures of any kind become a generic 500.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use relaychat_types::wire::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/chat - Relay one message plus history upstream.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload?;
    let start = Instant::now();

    let result = state.relay_service.relay(&request).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(reply) => {
            tracing::info!(
                history = request.history.len(),
                has_attachment = request.attachment.is_some(),
                elapsed_ms,
                "Chat relayed"
            );
            Ok(Json(ChatReply { reply }))
        }
        Err(e) => {
            tracing::error!(error = %e, elapsed_ms, "Chat relay failed");
            Err(e.into())
        }
    }
}
