//! Transcript persistence endpoints.
//!
//! - POST /api/save-chat - Append one record
//! - GET  /api/get-chat  - List every record, oldest first

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use relaychat_types::chat::ChatRecord;
use relaychat_types::wire::{SaveChatRequest, SaveChatResponse};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/save-chat - Store `{role, text}` with the server's clock.
pub async fn save_chat(
    State(state): State<AppState>,
    payload: Result<Json<SaveChatRequest>, JsonRejection>,
) -> Result<Json<SaveChatResponse>, AppError> {
    let Json(body) = payload?;
    state.transcript_service.append(&body.role, &body.text).await?;
    Ok(Json(SaveChatResponse { success: true }))
}

/// GET /api/get-chat - Every record ordered by creation time.
pub async fn get_chat(State(state): State<AppState>) -> Result<Json<Vec<ChatRecord>>, AppError> {
    Ok(Json(state.transcript_service.list().await?))
}
