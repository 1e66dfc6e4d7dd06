//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, FeedbackRequest, QueuedResponse, VersionResponse,
};
use super::AppState;
use crate::conversation::{Conversation, ControllerError, SendOutcome};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Conversation snapshot and live updates
        .route("/api/conversation", get(get_conversation))
        .route("/api/conversation/stream", get(stream_conversation))
        // User actions
        .route("/api/conversation/chat", post(send_chat))
        .route("/api/conversation/reset", post(reset_conversation))
        .route("/api/messages/:id/feedback", post(submit_feedback))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversation
// ============================================================

async fn get_conversation(State(state): State<AppState>) -> Json<Conversation> {
    Json(state.controller.state())
}

async fn stream_conversation(State(state): State<AppState>) -> impl IntoResponse {
    // Subscribe before taking the snapshot so no event falls in between
    let events_rx = state.controller.subscribe();
    sse_stream(state.controller.state(), events_rx)
}

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    // Run on its own task so a client disconnect cannot cut a send in half
    let controller = state.controller.clone();
    let outcome = tokio::spawn(async move { controller.send(&req.text).await })
        .await
        .map_err(|e| AppError::Internal(format!("Send task failed: {e}")))?;

    if outcome == SendOutcome::Busy {
        return Err(AppError::from(ControllerError::Busy));
    }

    Ok(Json(ChatResponse {
        outcome: outcome.kind(),
        message: outcome.reply().cloned(),
    }))
}

async fn reset_conversation(
    State(state): State<AppState>,
) -> Result<Json<Conversation>, AppError> {
    let conversation = state.controller.reset()?;
    Ok(Json(conversation))
}

// ============================================================
// Feedback
// ============================================================

async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.controller.feedback_target(&id)?;

    let controller = state.controller.clone();
    tokio::spawn(async move {
        // The recorder logs failures; nothing else to do with them here
        let _ = controller.record_feedback(&id, req.feedback).await;
    });

    Ok(Json(QueuedResponse { queued: true }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<ControllerError> for AppError {
    fn from(e: ControllerError) -> Self {
        match e {
            ControllerError::Busy => AppError::Conflict(e.to_string()),
            ControllerError::UnknownMessage(_) => AppError::NotFound(e.to_string()),
            ControllerError::NotBotMessage(_) => AppError::BadRequest(e.to_string()),
            ControllerError::FeedbackRejected(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
