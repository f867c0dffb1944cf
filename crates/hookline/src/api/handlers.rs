//! API request handlers.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{HeaderName, request::Parts},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::wizard::{DEFAULT_SESSION_ID, Session, TemplateCatalog};

use super::error::{ApiError, ApiResult};
use super::state::AppState;

/// Header naming the wizard session a request belongs to.
pub static SESSION_HEADER: HeaderName = HeaderName::from_static("x-session-id");

/// Wizard session key taken from the `X-Session-Id` header.
///
/// Missing or blank headers map to the shared default session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey(pub String);

impl SessionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(&SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_SESSION_ID);
        Ok(SessionKey(key.to_string()))
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Acknowledgement for state-changing steps.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub product_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PlatformInput {
    pub platform: String,
}

#[derive(Debug, Deserialize)]
pub struct TemplateInput {
    pub template_name: String,
}

#[derive(Debug, Deserialize)]
pub struct HookSelection {
    pub hook_number: i64,
}

#[derive(Debug, Serialize)]
pub struct HooksResponse {
    pub hooks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FinalPostResponse {
    pub final_post: String,
}

/// Current selections of one session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub session: Session,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /product
#[instrument(skip_all, fields(session = %session.as_str()))]
pub async fn submit_product(
    State(state): State<AppState>,
    session: SessionKey,
    Json(input): Json<ProductInput>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .wizard
        .set_product(session.as_str(), &input.product_name)?;
    Ok(MessageResponse::new(format!(
        "Product '{}' saved successfully.",
        input.product_name
    )))
}

/// POST /select-platform
#[instrument(skip_all, fields(session = %session.as_str()))]
pub async fn select_platform(
    State(state): State<AppState>,
    session: SessionKey,
    Json(input): Json<PlatformInput>,
) -> ApiResult<Json<MessageResponse>> {
    let platform = state
        .wizard
        .select_platform(session.as_str(), &input.platform)?;
    Ok(MessageResponse::new(format!(
        "Platform '{}' selected.",
        platform.display_name()
    )))
}

/// GET /templates
pub async fn list_templates(State(state): State<AppState>) -> Json<TemplateCatalog> {
    Json(state.wizard.list_templates())
}

/// POST /select-template
#[instrument(skip_all, fields(session = %session.as_str()))]
pub async fn select_template(
    State(state): State<AppState>,
    session: SessionKey,
    Json(input): Json<TemplateInput>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .wizard
        .select_template(session.as_str(), &input.template_name)?;
    Ok(MessageResponse::new(format!(
        "Template '{}' selected.",
        input.template_name
    )))
}

/// GET /hooks
#[instrument(skip_all, fields(session = %session.as_str()))]
pub async fn generate_hooks(
    State(state): State<AppState>,
    session: SessionKey,
) -> ApiResult<Json<HooksResponse>> {
    let hooks = state.wizard.generate_hooks(session.as_str()).await?;
    Ok(Json(HooksResponse { hooks }))
}

/// POST /select-hook
#[instrument(skip_all, fields(session = %session.as_str()))]
pub async fn select_hook(
    State(state): State<AppState>,
    session: SessionKey,
    Json(input): Json<HookSelection>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .wizard
        .select_hook(session.as_str(), input.hook_number)?;
    Ok(MessageResponse::new(format!(
        "Hook {} selected.",
        input.hook_number
    )))
}

/// GET /generate-post
#[instrument(skip_all, fields(session = %session.as_str()))]
pub async fn generate_post(
    State(state): State<AppState>,
    session: SessionKey,
) -> ApiResult<Json<FinalPostResponse>> {
    let final_post = state.wizard.generate_final_post(session.as_str()).await?;
    Ok(Json(FinalPostResponse { final_post }))
}

/// GET /session
pub async fn get_session(State(state): State<AppState>, session: SessionKey) -> Json<SessionResponse> {
    let snapshot = state.wizard.snapshot(session.as_str());
    Json(SessionResponse {
        session_id: session.0,
        session: snapshot,
    })
}

/// DELETE /session
#[instrument(skip_all, fields(session = %session.as_str()))]
pub async fn reset_session(
    State(state): State<AppState>,
    session: SessionKey,
) -> Json<MessageResponse> {
    state.wizard.reset(session.as_str());
    info!(active_sessions = state.wizard.session_count(), "Wizard session cleared");
    MessageResponse::new("Session reset.")
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("No such endpoint")
}
