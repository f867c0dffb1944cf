//! Wizard service: session store plus the model-backed steps.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info, instrument, warn};

use crate::llm::{CompletionBackend, LlmError};

use super::catalog::TemplateCatalog;
use super::error::{WizardError, WizardResult};
use super::hooks::parse_hooks;
use super::models::{Platform, Session, Template};
use super::prompts;

/// Session used when the caller does not name one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Drives the wizard for any number of keyed sessions.
///
/// No lock is held across a model call: a step that races another step on
/// the same session reads whichever value was committed first.
pub struct WizardService {
    sessions: DashMap<String, Session>,
    backend: Arc<dyn CompletionBackend>,
}

impl WizardService {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            sessions: DashMap::new(),
            backend,
        }
    }

    /// Apply a transition to one session. A session that does not exist yet
    /// is only stored once a transition on it succeeds.
    fn update<T>(
        &self,
        session_id: &str,
        transition: impl FnOnce(&mut Session) -> WizardResult<T>,
    ) -> WizardResult<T> {
        match self.sessions.entry(session_id.to_string()) {
            Entry::Occupied(mut entry) => transition(entry.get_mut()),
            Entry::Vacant(entry) => {
                let mut session = Session::default();
                let value = transition(&mut session)?;
                entry.insert(session);
                Ok(value)
            }
        }
    }

    /// Current selections for a session (empty if it was never touched).
    pub fn snapshot(&self, session_id: &str) -> Session {
        self.sessions
            .get(session_id)
            .map(|session| session.value().clone())
            .unwrap_or_default()
    }

    /// Number of sessions currently held in memory.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    #[instrument(skip(self))]
    pub fn set_product(&self, session_id: &str, name: &str) -> WizardResult<()> {
        self.update(session_id, |session| session.set_product(name))?;
        debug!("Product saved");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn select_platform(&self, session_id: &str, platform: &str) -> WizardResult<Platform> {
        self.update(session_id, |session| session.select_platform(platform))
    }

    pub fn list_templates(&self) -> TemplateCatalog {
        TemplateCatalog
    }

    #[instrument(skip(self))]
    pub fn select_template(&self, session_id: &str, name: &str) -> WizardResult<Template> {
        self.update(session_id, |session| session.select_template(name))
    }

    /// Generate up to five candidate hooks and store them on the session.
    #[instrument(skip(self))]
    pub async fn generate_hooks(&self, session_id: &str) -> WizardResult<Vec<String>> {
        let inputs = self.snapshot(session_id).hook_inputs()?;

        let text = self
            .backend
            .complete(prompts::hooks_request(&inputs))
            .await
            .inspect_err(|e| warn!("Hook generation failed: {}", e))?;

        let hooks = parse_hooks(&text);
        if hooks.is_empty() {
            warn!("Model output contained no usable hook lines");
            return Err(WizardError::Upstream(LlmError::EmptyResponse));
        }

        info!(count = hooks.len(), "Generated hooks");
        self.update(session_id, |session| {
            session.store_hooks(hooks.clone());
            Ok(())
        })?;
        Ok(hooks)
    }

    #[instrument(skip(self))]
    pub fn select_hook(&self, session_id: &str, number: i64) -> WizardResult<String> {
        self.update(session_id, |session| {
            session.select_hook(number).map(str::to_string)
        })
    }

    /// Generate the final post. The result is returned, not stored.
    #[instrument(skip(self))]
    pub async fn generate_final_post(&self, session_id: &str) -> WizardResult<String> {
        let inputs = self.snapshot(session_id).post_inputs()?;

        let post = self
            .backend
            .complete(prompts::post_request(&inputs))
            .await
            .inspect_err(|e| warn!("Final post generation failed: {}", e))?;

        info!(chars = post.chars().count(), "Generated final post");
        Ok(post)
    }

    /// Forget every selection made in a session.
    #[instrument(skip(self))]
    pub fn reset(&self, session_id: &str) {
        if self.sessions.remove(session_id).is_some() {
            info!("Session reset");
        }
    }
}
