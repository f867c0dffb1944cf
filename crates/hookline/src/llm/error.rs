//! LLM client error types.

use thiserror::Error;

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while talking to the completion API.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("LLM API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Unauthorized (missing or invalid API key).
    #[error("Unauthorized: invalid or missing API key")]
    Unauthorized,

    /// Quota or rate limit exhausted upstream.
    #[error("Rate limited by LLM API: {0}")]
    RateLimited(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The model answered without any usable text.
    #[error("LLM returned an empty completion")]
    EmptyResponse,

    /// Connection failed.
    #[error("Failed to connect to LLM API at {url}: {message}")]
    ConnectionFailed { url: String, message: String },
}
