//! API route definitions.

use axum::http::{HeaderValue, Method, header};
use axum::{
    Router,
    routing::{get, post},
};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers::{self, SESSION_HEADER};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.server.cors_origins);
    let max_concurrency = state.server.max_concurrency.max(1);

    // Tracing layer with request timing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(handlers::health))
        // Wizard steps, in call order
        .route("/product", post(handlers::submit_product))
        .route("/select-platform", post(handlers::select_platform))
        .route("/templates", get(handlers::list_templates))
        .route("/select-template", post(handlers::select_template))
        .route("/hooks", get(handlers::generate_hooks))
        .route("/select-hook", post(handlers::select_hook))
        .route("/generate-post", get(handlers::generate_post))
        // Session inspection and reset
        .route(
            "/session",
            get(handlers::get_session).delete(handlers::reset_session),
        )
        .fallback(handlers::not_found)
        .layer(GlobalConcurrencyLimitLayer::new(max_concurrency))
        .layer(cors)
        .layer(trace_layer)
        .with_state(state)
}

/// Build the CORS layer. No configured origins means any origin is allowed.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let headers = [header::CONTENT_TYPE, header::ACCEPT, SESSION_HEADER.clone()];

    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("CORS: Invalid origin in config: {}", origin);
                None
            })
        })
        .collect();

    if origins.is_empty() {
        tracing::error!("CORS: All configured origins are invalid!");
        CorsLayer::new().allow_origin(AllowOrigin::exact(HeaderValue::from_static("null")))
    } else {
        tracing::info!("CORS: Allowing {} origin(s)", origins.len());
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(headers)
    }
}
