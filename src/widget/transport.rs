use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::types::{ChatRequest, ChatResponse};

/// One shared connection pool for every widget instance on the page.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("chat endpoint returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("malformed chat response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Carries one user message to the chat endpoint and returns the reply text.
#[async_trait]
pub trait ChatTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError>;
}

/// Production transport: POSTs `{"message"}` to the chat endpoint and parses
/// `{"response"}` back.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        Ok(parsed.response)
    }
}
