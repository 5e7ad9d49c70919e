//! HTTP request handlers

use super::types::{
    ActionRequest, ChatRequest, ClearResponse, ErrorResponse, FeedbackRequest, LanguageRequest,
    MessageView, MessagesResponse, ModeRequest, ProfileResponse, RenderRequest, RenderResponse,
    SessionCreatedResponse, SessionListResponse, SessionSummary, StateResponse, SuccessResponse,
    TurnResponse,
};
use super::AppState;
use crate::render::parse_blocks;
use crate::runtime::ControllerError;
use crate::state_machine::TransitionError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Top-level view
        .route("/api/state", get(get_state))
        // Sessions
        .route("/api/sessions", get(list_sessions).post(new_chat))
        .route("/api/sessions/:id/select", post(select_session))
        .route("/api/sessions/:id/messages", get(get_messages))
        // Turns
        .route("/api/chat", post(send_chat))
        .route("/api/actions", post(run_quick_action))
        .route("/api/feedback", post(send_feedback))
        // Settings
        .route("/api/mode", put(set_mode))
        .route("/api/language", put(set_language))
        // Progression
        .route("/api/profile", get(get_profile))
        .route("/api/history", delete(clear_history))
        // Rendering
        .route("/api/render", post(render_text))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// State
// ============================================================

async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(state.controller.status().into())
}

// ============================================================
// Sessions
// ============================================================

async fn list_sessions(State(state): State<AppState>) -> Json<SessionListResponse> {
    let (sessions, active_session_id) = state.controller.sessions();
    Json(SessionListResponse {
        sessions: sessions.iter().map(SessionSummary::from).collect(),
        active_session_id,
    })
}

async fn new_chat(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    Json(SessionCreatedResponse {
        session_id: Some(state.controller.new_chat()),
    })
}

async fn select_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.controller.select_session(&id)?;
    Ok(Json(SuccessResponse::ok()))
}

async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessagesResponse>, AppError> {
    let session = state.controller.session(&id)?;
    Ok(Json(MessagesResponse {
        messages: session.messages.iter().map(MessageView::from).collect(),
        session_id: session.id,
    }))
}

// ============================================================
// Turns
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let outcome = state.controller.submit(&req.text).await?;
    Ok(Json(outcome.into()))
}

async fn run_quick_action(
    State(state): State<AppState>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let outcome = state.controller.quick_action(req.action).await?;
    Ok(Json(outcome.into()))
}

async fn send_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let outcome = state.controller.submit_feedback(&req.text).await?;
    Ok(Json(outcome.into()))
}

// ============================================================
// Settings
// ============================================================

async fn set_mode(
    State(state): State<AppState>,
    Json(req): Json<ModeRequest>,
) -> Json<SessionCreatedResponse> {
    Json(SessionCreatedResponse {
        session_id: state.controller.set_mode(req.mode),
    })
}

async fn set_language(
    State(state): State<AppState>,
    Json(req): Json<LanguageRequest>,
) -> Result<Json<SessionCreatedResponse>, AppError> {
    let session_id = state.controller.set_language(&req.code)?;
    Ok(Json(SessionCreatedResponse { session_id }))
}

// ============================================================
// Progression
// ============================================================

async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    Json(state.controller.profile().into())
}

async fn clear_history(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse {
        notification: state.controller.clear_all(),
    })
}

// ============================================================
// Rendering
// ============================================================

async fn render_text(Json(req): Json<RenderRequest>) -> Json<RenderResponse> {
    Json(RenderResponse::new(parse_blocks(&req.text)))
}

async fn get_version() -> &'static str {
    concat!("vansiso ", env!("CARGO_PKG_VERSION"))
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
    fn from(error: ControllerError) -> Self {
        let message = error.to_string();
        match error {
            ControllerError::Rejected(TransitionError::TurnInFlight) => AppError::Conflict(message),
            ControllerError::UnknownSession(_) => AppError::NotFound(message),
            ControllerError::Internal(_) => {
                tracing::error!(error = %message, "Turn failed internally");
                AppError::Internal(message)
            }
            ControllerError::Rejected(_)
            | ControllerError::UnknownLanguage(_)
            | ControllerError::WrongMode { .. }
            | ControllerError::InstructorOnly => AppError::BadRequest(message),
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
