//! HTTP API module.
//!
//! Maps each wizard step onto a JSON endpoint.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::{SESSION_HEADER, SessionKey};
pub use routes::create_router;
pub use state::{AppState, ServerState};
