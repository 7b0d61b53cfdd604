use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use super::AppState;
use crate::types::{ChatRequest, ChatResponse, ErrorResponse};

/// Fixed payload for every failure at this boundary. Transport and upstream
/// details go to the diagnostic log only.
const GENERIC_ERROR: &str = "Failed to process the request.";

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|err| {
        tracing::warn!(error = %err, "rejected malformed chat request");
        generic_error()
    })?;

    let message = request.message.trim();
    if message.is_empty() {
        tracing::warn!("rejected chat request with empty message");
        return Err(generic_error());
    }

    let system_prompt = state.persona.system_prompt();
    match state.backend.complete(&system_prompt, message).await {
        Ok(text) => Ok(Json(ChatResponse { response: text })),
        Err(err) => {
            tracing::error!(error = %err, "chat completion failed");
            Err(generic_error())
        }
    }
}

fn generic_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: GENERIC_ERROR.to_string(),
        }),
    )
}
