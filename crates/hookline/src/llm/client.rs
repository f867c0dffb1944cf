//! OpenAI-compatible chat completion client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::CompletionBackend;
use super::error::{LlmError, LlmResult};
use super::types::*;

/// Settings for [`OpenAiClient`].
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// Base URL including the version prefix (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier (e.g., "gpt-4").
    pub model: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Client for communicating with an OpenAI-compatible completion API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    /// HTTP client.
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// API key.
    api_key: String,
    /// Model used for every completion.
    model: String,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(config: OpenAiClientConfig) -> LlmResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
        })
    }

    /// The model identifier this client requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Handle response and extract the first choice's text.
    async fn handle_response(&self, response: reqwest::Response) -> LlmResult<String> {
        let status = response.status();

        if status.is_success() {
            let parsed: ChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| LlmError::ParseError(format!("Failed to parse response: {}", e)))?;
            return match parsed.into_text() {
                Some(text) if !text.trim().is_empty() => Ok(text),
                _ => Err(LlmError::EmptyResponse),
            };
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        match status {
            StatusCode::UNAUTHORIZED => Err(LlmError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(LlmError::RateLimited(message)),
            _ => Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> LlmResult<String> {
        let url = self.completions_url();
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(request.prompt)],
            temperature: request.temperature,
        };

        debug!(model = %self.model, temperature = request.temperature, "Requesting completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::ConnectionFailed {
                        url: url.clone(),
                        message: e.to_string(),
                    }
                } else {
                    LlmError::RequestFailed(e)
                }
            })?;

        self.handle_response(response).await
    }
}
