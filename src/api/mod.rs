use std::sync::Arc;

use axum::{Router, routing::post};

use crate::{ai::LLMBackend, persona::Persona};

pub mod handlers;

/// Shared state for the chat endpoint. Handlers hold no other state, so
/// separate requests are trivially concurrent.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn LLMBackend>,
    pub persona: Arc<Persona>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(handlers::chat))
}
