//! Session history handlers.
//!
//! Endpoints:
//! - GET    /api/history/{session_id} - Turns for a session (empty if unknown)
//! - DELETE /api/history/{session_id} - Drop a session's turns (idempotent)

use axum::extract::{Path, State};
use axum::Json;

use anos_types::chat::{HistoryResponse, StatusMessage};

use crate::http::error::AppError;
use crate::state::AppState;

pub const HISTORY_CLEARED: &str = "Conversation history cleared";

pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let history = state.relay.history(&session_id).await?;
    Ok(Json(HistoryResponse { history }))
}

pub async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<StatusMessage>, AppError> {
    state.relay.clear_history(&session_id).await?;
    Ok(Json(StatusMessage {
        message: HISTORY_CLEARED.to_string(),
    }))
}
