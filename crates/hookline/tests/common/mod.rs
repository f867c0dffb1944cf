//! Test utilities and common setup.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, StatusCode, header},
};
use serde_json::Value;
use tokio::sync::Notify;
use tower::ServiceExt;

use hookline::api::{self, AppState, ServerState};
use hookline::llm::{CompletionBackend, CompletionRequest, LlmError, LlmResult};

// ============================================================================
// Mock CompletionBackend for testing
// ============================================================================

/// Mock completion backend that answers by prompt kind.
pub struct MockCompletionBackend {
    /// Reply for hook prompts.
    pub hooks_reply: String,
    /// Reply for final post prompts.
    pub post_reply: String,
    /// Whether every call should fail.
    pub fail: bool,
    /// Every request received, in order.
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionBackend {
    /// Create a new mock backend with realistic canned answers.
    pub fn new() -> Self {
        Self {
            hooks_reply: [
                "- Meet SuperWidget, the last widget you'll ever need.",
                "• Tired of clunky tools? SuperWidget fixes that.",
                "",
                "- Built for pros who hate wasting time.",
                "-   One widget. Zero compromises.",
                "- Your workflow, supercharged.",
                "- A sixth hook that should be dropped.",
            ]
            .join("\n"),
            post_reply: "SuperWidget is here. Less setup, more shipping. #productivity".to_string(),
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_hooks_reply(mut self, reply: &str) -> Self {
        self.hooks_reply = reply.to_string();
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletionBackend {
    async fn complete(&self, request: CompletionRequest) -> LlmResult<String> {
        let is_hooks = request.prompt.contains("hook lines");
        self.requests.lock().unwrap().push(request);

        if self.fail {
            return Err(LlmError::RateLimited("quota exceeded".to_string()));
        }
        if is_hooks {
            Ok(self.hooks_reply.clone())
        } else {
            Ok(self.post_reply.clone())
        }
    }
}

/// Backend that parks every call until the test releases it.
#[derive(Default)]
pub struct GatedCompletionBackend {
    /// Signalled when a call has started.
    pub entered: Notify,
    /// Signalled by the test to let one call finish.
    pub release: Notify,
}

#[async_trait]
impl CompletionBackend for GatedCompletionBackend {
    async fn complete(&self, _request: CompletionRequest) -> LlmResult<String> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok("- Gated hook".to_string())
    }
}

/// Create a test application with explicit server settings.
pub fn test_app_with_server(backend: Arc<dyn CompletionBackend>, server: ServerState) -> Router {
    api::create_router(AppState::new(backend, server))
}

/// Create a test application around the given backend.
pub fn test_app_with_backend(backend: Arc<MockCompletionBackend>) -> Router {
    test_app_with_server(backend, ServerState::default())
}

/// Create a test application with the default mock backend.
pub fn test_app() -> (Router, Arc<MockCompletionBackend>) {
    let backend = Arc::new(MockCompletionBackend::new());
    (test_app_with_backend(backend.clone()), backend)
}

// ============================================================================
// Request helpers
// ============================================================================

/// Send a request, optionally with a JSON body and a session header.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    session: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(session) = session {
        builder = builder.header("x-session-id", session);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// Send a request and decode the JSON response.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    session: Option<&str>,
) -> (StatusCode, Value) {
    let response = send(app, method, uri, body, session).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
