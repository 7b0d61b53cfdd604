use std::env;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;

use super::{ChatError, ChatResult, LLMBackend, MAX_REPLY_TOKENS, SAMPLING_TEMPERATURE};

/// Rig-based providers behind the common backend interface.
pub enum RigProvider {
    OpenAI(providers::openai::Client),
    Anthropic(providers::anthropic::Client),
    Ollama(providers::ollama::Client),
}

impl RigProvider {
    pub fn openai(api_key: &str) -> Self {
        Self::OpenAI(providers::openai::Client::new(api_key))
    }

    pub fn anthropic(api_key: &str) -> Self {
        Self::Anthropic(providers::anthropic::Client::new(api_key))
    }

    /// Endpoint comes from `OLLAMA_HOST`, read by the Rig client itself
    /// (defaults to http://localhost:11434).
    pub fn ollama() -> Self {
        Self::Ollama(providers::ollama::Client::new())
    }
}

#[async_trait]
impl LLMBackend for RigProvider {
    async fn complete(&self, system_prompt: &str, message: &str) -> ChatResult<String> {
        match self {
            Self::OpenAI(client) => {
                let model =
                    env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

                let agent = client
                    .agent(&model)
                    .preamble(system_prompt)
                    .max_tokens(MAX_REPLY_TOKENS)
                    .temperature(SAMPLING_TEMPERATURE)
                    .build();

                agent
                    .prompt(message)
                    .await
                    .map_err(|err| ChatError::new(err.to_string()))
            }
            Self::Anthropic(client) => {
                let model = env::var("ANTHROPIC_MODEL")
                    .unwrap_or_else(|_| "claude-3-5-sonnet-20241022".to_string());

                let agent = client
                    .agent(&model)
                    .preamble(system_prompt)
                    .max_tokens(MAX_REPLY_TOKENS)
                    .temperature(SAMPLING_TEMPERATURE)
                    .build();

                agent
                    .prompt(message)
                    .await
                    .map_err(|err| ChatError::new(err.to_string()))
            }
            Self::Ollama(client) => {
                let model = env::var("LLM_MODEL").unwrap_or_else(|_| "llama3.1:latest".to_string());

                let agent = client
                    .agent(&model)
                    .preamble(system_prompt)
                    .max_tokens(MAX_REPLY_TOKENS)
                    .temperature(SAMPLING_TEMPERATURE)
                    .build();

                agent
                    .prompt(message)
                    .await
                    .map_err(|err| ChatError::new(err.to_string()))
            }
        }
    }
}
