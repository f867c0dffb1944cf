//! Application state shared across handlers.

use std::sync::Arc;

use crate::llm::CompletionBackend;
use crate::wizard::WizardService;

/// HTTP-layer configuration.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Maximum number of requests handled at once.
    pub max_concurrency: usize,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            max_concurrency: 10,
        }
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Wizard sessions and model-backed steps.
    pub wizard: Arc<WizardService>,
    /// HTTP-layer configuration.
    pub server: ServerState,
}

impl AppState {
    /// Create new application state around a completion backend.
    pub fn new(backend: Arc<dyn CompletionBackend>, server: ServerState) -> Self {
        Self {
            wizard: Arc::new(WizardService::new(backend)),
            server,
        }
    }
}
