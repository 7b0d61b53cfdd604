use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatError, ChatResult, LLMBackend, MAX_REPLY_TOKENS, SAMPLING_TEMPERATURE};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Client for a custom OpenAI-compatible chat-completions endpoint.
pub struct CustomBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl CustomBackend {
    pub fn from_env(endpoint: String) -> Self {
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_key = std::env::var("LLM_API_KEY").ok();
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
        }
    }

    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
        }
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u64,
}

// Accept OpenAI-shaped responses first, then a bare { content } payload.
#[derive(Deserialize)]
struct UpstreamMessage {
    content: String,
}

#[derive(Deserialize)]
struct UpstreamChoice {
    message: Option<UpstreamMessage>,
}

#[derive(Deserialize)]
struct OpenAIShape {
    choices: Vec<UpstreamChoice>,
}

#[derive(Deserialize)]
struct ContentOnly {
    content: String,
}

fn extract_completion_text(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<OpenAIShape>(body)
        && let Some(choice) = parsed.choices.into_iter().next()
        && let Some(message) = choice.message
    {
        return Some(message.content);
    }

    if let Ok(parsed) = serde_json::from_str::<ContentOnly>(body) {
        return Some(parsed.content);
    }

    None
}

#[async_trait]
impl LLMBackend for CustomBackend {
    async fn complete(&self, system_prompt: &str, message: &str) -> ChatResult<String> {
        let mut request = self.client.post(&self.endpoint).json(&CompletionRequest {
            model: &self.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: system_prompt,
                },
                WireMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: SAMPLING_TEMPERATURE,
            max_tokens: MAX_REPLY_TOKENS,
        });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ChatError::new(format!(
                "completion endpoint error {status}: {body}"
            )));
        }

        match extract_completion_text(&body) {
            Some(text) => Ok(text),
            // Raw text body as a last resort
            None => Ok(body),
        }
    }
}
