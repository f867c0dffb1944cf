//! Wizard error types.

use thiserror::Error;

use crate::llm::LlmError;

/// Result type for wizard operations.
pub type WizardResult<T> = Result<T, WizardError>;

/// Errors that can occur during a wizard step.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The caller supplied a value outside the accepted set.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A named resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A step was invoked before the step it depends on.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// The completion API failed or returned unusable content.
    #[error("Upstream failure: {0}")]
    Upstream(#[from] LlmError),
}

impl WizardError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionFailed(msg.into())
    }
}
