//! Completion layer for the chat endpoint.
//!
//! Provides a unified interface over the supported LLM providers (custom
//! OpenAI-compatible endpoint, OpenAI, Anthropic, Ollama) with automatic
//! detection based on environment variables. Every call is single-turn: one
//! system instruction, one user message, one completion back.

mod custom;
mod providers;

pub use custom::CustomBackend;
pub use providers::RigProvider;

use std::{env, fmt, sync::Arc};

use async_trait::async_trait;

/// Fixed sampling for resume answers.
pub(crate) const SAMPLING_TEMPERATURE: f64 = 0.7;
pub(crate) const MAX_REPLY_TOKENS: u64 = 500;

#[derive(Debug, Clone)]
pub struct ChatError(String);

impl ChatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ChatError {}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::new(err.to_string())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

/// A chat-completion provider the endpoint can call.
#[async_trait]
pub trait LLMBackend: Send + Sync {
    /// Sends one system turn plus one user turn and returns the completion
    /// text. No conversation state is kept between calls.
    async fn complete(&self, system_prompt: &str, message: &str) -> ChatResult<String>;
}

/// Auto-detect and configure a backend from environment variables.
///
/// Priority order:
/// 1. `LLM_ENDPOINT` -> custom OpenAI-compatible endpoint
/// 2. `OPENAI_API_KEY` -> OpenAI
/// 3. `ANTHROPIC_API_KEY` -> Claude
/// 4. `LLM_USE_OLLAMA=true` -> local Ollama
pub fn backend_from_env() -> anyhow::Result<Arc<dyn LLMBackend>> {
    if let Ok(endpoint) = env::var("LLM_ENDPOINT") {
        return Ok(Arc::new(CustomBackend::from_env(endpoint)));
    }

    if let Ok(key) = env::var("OPENAI_API_KEY") {
        return Ok(Arc::new(RigProvider::openai(&key)));
    }

    if let Ok(key) = env::var("ANTHROPIC_API_KEY") {
        return Ok(Arc::new(RigProvider::anthropic(&key)));
    }

    let use_ollama = matches!(
        env::var("LLM_USE_OLLAMA")
            .unwrap_or_else(|_| "false".into())
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes" | "on"
    );

    if use_ollama {
        return Ok(Arc::new(RigProvider::ollama()));
    }

    Err(anyhow::anyhow!(
        "No completion provider configured. Set LLM_ENDPOINT, OPENAI_API_KEY, ANTHROPIC_API_KEY, or LLM_USE_OLLAMA=true"
    ))
}
