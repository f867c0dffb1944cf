//! LLM completion client module.
//!
//! Provides the `CompletionBackend` seam used by the wizard and an async
//! client for OpenAI-compatible chat completion APIs.

mod client;
mod error;
mod types;

pub use client::{OpenAiClient, OpenAiClientConfig};
pub use error::{LlmError, LlmResult};
pub use types::*;

use async_trait::async_trait;

/// A text-completion collaborator.
///
/// Given a model, a prompt and a sampling temperature, returns one generated
/// text. Implementations own their own timeout policy; callers never retry.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run a single completion round trip.
    async fn complete(&self, request: CompletionRequest) -> LlmResult<String>;
}
