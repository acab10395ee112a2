//! REST + WebSocket endpoints for the quiz wizard.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::answers::{MultiField, SingleField};
use super::controller::{WizardCommand, WizardController};
use super::registration::RegistrationForm;
use super::sessions::QuizSessions;
use crate::error::QuizError;

/// Shared state for quiz routes.
#[derive(Clone)]
pub struct QuizRouteState {
    pub sessions: Arc<QuizSessions>,
}

/// Build the quiz router.
pub fn quiz_routes(sessions: Arc<QuizSessions>) -> Router {
    let state = QuizRouteState { sessions };

    Router::new()
        .route("/health", get(health))
        .route("/api/quiz", post(create_session))
        .route("/api/quiz/{id}", get(get_snapshot))
        .route("/api/quiz/{id}/select", post(select))
        .route("/api/quiz/{id}/toggle", post(toggle))
        .route("/api/quiz/{id}/advance", post(advance))
        .route("/api/quiz/{id}/back", post(back))
        .route("/api/quiz/{id}/submit", post(submit))
        .route("/api/quiz/{id}/ws", get(ws_handler))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

fn error_body(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (
        status,
        Json(serde_json::json!({"error": message.to_string()})),
    )
        .into_response()
}

fn quiz_error(e: QuizError) -> Response {
    let status = match &e {
        QuizError::SingleFieldNotOnStep { .. }
        | QuizError::MultiFieldNotOnStep { .. }
        | QuizError::UnknownOption { .. }
        | QuizError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        QuizError::NotAtRegistration { .. } | QuizError::AlreadySubmitted => StatusCode::CONFLICT,
        QuizError::Registration(_) => StatusCode::BAD_GATEWAY,
    };
    error_body(status, e)
}

fn parse_session_id(id: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(id).map_err(|_| error_body(StatusCode::BAD_REQUEST, "Invalid session ID"))
}

async fn find(state: &QuizRouteState, session_id: Uuid) -> Result<Arc<WizardController>, Response> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "Quiz session not found"))
}

async fn lookup(state: &QuizRouteState, id: &str) -> Result<Arc<WizardController>, Response> {
    find(state, parse_session_id(id)?).await
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "cycle-quiz"
    }))
}

// ── REST Endpoints ──────────────────────────────────────────────────────

async fn create_session(State(state): State<QuizRouteState>) -> impl IntoResponse {
    let (session_id, controller) = state.sessions.create().await;
    let snapshot = controller.snapshot().await;
    (
        StatusCode::CREATED,
        Json(serde_json::json!({"session_id": session_id, "snapshot": snapshot})),
    )
}

async fn get_snapshot(State(state): State<QuizRouteState>, Path(id): Path<String>) -> Response {
    match lookup(&state, &id).await {
        Ok(controller) => Json(controller.snapshot().await).into_response(),
        Err(resp) => resp,
    }
}

#[derive(Deserialize)]
struct SelectRequest {
    field: SingleField,
    value: String,
}

async fn select(
    State(state): State<QuizRouteState>,
    Path(id): Path<String>,
    Json(body): Json<SelectRequest>,
) -> Response {
    let controller = match lookup(&state, &id).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match controller.select(body.field, &body.value).await {
        Ok(target) => Json(serde_json::json!({
            "next_step": target,
            "snapshot": controller.snapshot().await,
        }))
        .into_response(),
        Err(e) => quiz_error(e),
    }
}

#[derive(Deserialize)]
struct ToggleRequest {
    field: MultiField,
    value: String,
}

async fn toggle(
    State(state): State<QuizRouteState>,
    Path(id): Path<String>,
    Json(body): Json<ToggleRequest>,
) -> Response {
    let controller = match lookup(&state, &id).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match controller.toggle(body.field, &body.value).await {
        Ok(toggle) => Json(serde_json::json!({
            "selected": toggle.inserted(),
            "snapshot": controller.snapshot().await,
        }))
        .into_response(),
        Err(e) => quiz_error(e),
    }
}

async fn advance(State(state): State<QuizRouteState>, Path(id): Path<String>) -> Response {
    let controller = match lookup(&state, &id).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let moved = controller.advance().await.is_some();
    Json(serde_json::json!({
        "moved": moved,
        "snapshot": controller.snapshot().await,
    }))
    .into_response()
}

async fn back(State(state): State<QuizRouteState>, Path(id): Path<String>) -> Response {
    let controller = match lookup(&state, &id).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let moved = controller.back().await.is_some();
    Json(serde_json::json!({
        "moved": moved,
        "snapshot": controller.snapshot().await,
    }))
    .into_response()
}

async fn submit(
    State(state): State<QuizRouteState>,
    Path(id): Path<String>,
    Json(form): Json<RegistrationForm>,
) -> Response {
    let session_id = match parse_session_id(&id) {
        Ok(session_id) => session_id,
        Err(resp) => return resp,
    };
    let controller = match find(&state, session_id).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match controller.submit(form).await {
        Ok(submission_id) => {
            let score = controller.score().await;
            // The answers have been handed off; the session is done.
            state.sessions.remove(session_id).await;
            (
                StatusCode::OK,
                Json(serde_json::json!({"submission_id": submission_id, "score": score})),
            )
                .into_response()
        }
        Err(e) => quiz_error(e),
    }
}

// ── WebSocket ───────────────────────────────────────────────────────────

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<QuizRouteState>,
    Path(id): Path<String>,
) -> Response {
    let controller = match lookup(&state, &id).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    info!(session_id = %id, "Quiz WebSocket client connecting");
    ws.on_upgrade(move |socket| handle_socket(socket, controller))
}

async fn send_snapshot(socket: &mut WebSocket, controller: &WizardController) -> bool {
    let snapshot = controller.snapshot().await;
    let msg = serde_json::json!({"type": "snapshot", "snapshot": snapshot});
    socket.send(Message::Text(msg.to_string().into())).await.is_ok()
}

async fn handle_socket(mut socket: WebSocket, controller: Arc<WizardController>) {
    // Subscribe before the initial snapshot so nothing in between is missed.
    let mut rx = controller.subscribe();

    if !send_snapshot(&mut socket, &controller).await {
        warn!("Failed to send initial snapshot, client disconnected");
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if let Ok(json) = serde_json::to_string(&event) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                debug!("Client disconnected during send");
                                break;
                            }
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        warn!(missed = n, "WS client lagged behind broadcast");
                        if !send_snapshot(&mut socket, &controller).await {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }

            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_message(&text, &controller).await;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Quiz WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("Quiz WebSocket connection closed");
}

async fn handle_client_message(text: &str, controller: &WizardController) {
    match serde_json::from_str::<WizardCommand>(text) {
        Ok(command) => {
            if let Err(e) = controller.apply(command).await {
                warn!(error = %e, "Quiz command rejected");
            }
        }
        Err(e) => {
            debug!(error = %e, text = text, "Unrecognized WS message from client");
        }
    }
}
