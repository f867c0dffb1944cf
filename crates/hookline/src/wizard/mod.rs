//! Post-writing wizard.
//!
//! Walks a caller through product, platform, template, hook and final post,
//! delegating the creative steps to a [`CompletionBackend`](crate::llm::CompletionBackend).

pub mod catalog;
mod error;
pub mod hooks;
mod models;
pub mod prompts;
mod service;

pub use catalog::TemplateCatalog;
pub use error::{WizardError, WizardResult};
pub use models::{HookInputs, MAX_HOOKS, Platform, PostInputs, Session, Template};
pub use service::{DEFAULT_SESSION_ID, WizardService};
