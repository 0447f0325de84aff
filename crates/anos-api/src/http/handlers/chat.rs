//! POST /api/chat
//!
//! Runs one exchange through the relay. A body that fails to parse as JSON
//! is answered like a missing message (400), not with axum's default
//! rejection.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use anos_types::chat::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let reply = state
        .relay
        .handle_chat(body.message.as_deref(), body.session_id.as_deref())
        .await?;

    Ok(Json(reply))
}
