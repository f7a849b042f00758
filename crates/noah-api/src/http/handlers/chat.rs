//! Chat HTTP handlers.
//!
//! Endpoints:
//! - POST /chat/message              - Send a message, get the reply
//! - GET  /chat/history/{session_id} - Full transcript for a session
//! - GET  /chat/history              - 400, session id required

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use noah_types::error::ChatError;

use crate::http::dto::{HistoryResponse, IncomingMessage, SendMessageResponse};
use crate::http::error::AppError;
use crate::state::AppState;

/// POST /chat/message
pub async fn send_message(
    State(state): State<AppState>,
    body: Result<Json<IncomingMessage>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let Json(body) = body?;

    let reply = state
        .chat_service
        .handle_message(body.session_id(), body.message())
        .await?;

    Ok(Json(SendMessageResponse {
        reply: reply.reply,
        session_id: reply.conversation_id.to_string(),
    }))
}

/// GET /chat/history/{session_id}
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let messages = state.chat_service.history(Some(&session_id)).await?;

    Ok(Json(HistoryResponse {
        messages,
        session_id: session_id.trim().to_string(),
    }))
}

/// GET /chat/history without a session id.
pub async fn missing_session_id() -> AppError {
    ChatError::MissingSessionId.into()
}
