//! HTTP API route definitions.

use axum::{middleware, routing::any, Router};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers::{greeting, liveness, log_request, readiness, startup, users, AppState};

/// Create the API router.
///
/// Paths are matched exactly and case-sensitively, with no trailing-slash
/// normalization; any HTTP method is dispatched the same way. Everything
/// that is not one of the four literal routes falls back to the greeting.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Probe endpoints
        .route("/startup", any(startup))
        .route("/liveness", any(liveness))
        .route("/readiness", any(readiness))
        // User listing
        .route("/users", any(users))
        .fallback(greeting)
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)))
        .with_state(state)
}
