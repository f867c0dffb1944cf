//! Hookline library.
//!
//! A small HTTP service that walks a user through writing a marketing post,
//! delegating hook and post generation to an LLM completion API.

pub mod api;
pub mod llm;
pub mod settings;
pub mod wizard;
