//! Custom-action webhook for the dialogue engine.
//!
//! `POST /webhook` runs the requested action against the tracker's slots and
//! answers with the engine's `{events, responses}` envelope. `GET /actions`
//! and `GET /health` are used by the engine's startup checks.

use crate::domain::{DomainError, OutgoingMessage, Slots};
use crate::usecases::ActionRegistry;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// Body the engine posts for every custom action.
#[derive(Debug, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: TrackerState,
}

/// The part of the conversation tracker the actions read.
#[derive(Debug, Default, Deserialize)]
pub struct TrackerState {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: Slots,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Actions never set slots, so this is always empty.
    pub events: Vec<Value>,
    pub responses: Vec<OutgoingMessage>,
}

#[derive(Debug, Serialize)]
struct ActionInfo {
    name: &'static str,
}

pub fn router(registry: Arc<ActionRegistry>) -> Router {
    Router::new()
        .route("/webhook", post(run_action))
        .route("/actions", get(list_actions))
        .route("/health", get(health))
        .with_state(registry)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(registry: Arc<ActionRegistry>, addr: &str) -> Result<(), DomainError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| DomainError::Server(format!("bind {}: {}", addr, e)))?;
    info!(addr, actions = registry.handlers().len(), "action server listening");
    axum::serve(listener, router(registry))
        .await
        .map_err(|e| DomainError::Server(e.to_string()))
}

async fn run_action(
    State(registry): State<Arc<ActionRegistry>>,
    Json(call): Json<ActionCall>,
) -> Response {
    let sender = call
        .sender_id
        .as_deref()
        .or(call.tracker.sender_id.as_deref())
        .unwrap_or("unknown");
    info!(action = %call.next_action, sender, "action requested");

    match registry.dispatch(&call.next_action, &call.tracker.slots).await {
        Some(message) => Json(ActionResponse {
            events: Vec::new(),
            responses: vec![message],
        })
        .into_response(),
        None => {
            warn!(action = %call.next_action, "no such action");
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": format!("No registered action found for name '{}'.", call.next_action),
                    "action_name": call.next_action,
                })),
            )
                .into_response()
        }
    }
}

async fn list_actions(State(registry): State<Arc<ActionRegistry>>) -> Json<Vec<ActionInfo>> {
    Json(
        registry
            .names()
            .into_iter()
            .map(|name| ActionInfo { name })
            .collect(),
    )
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
