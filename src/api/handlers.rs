//! HTTP API handlers.
//!
//! Every handler answers 200. The `/users` handler reports store failures
//! inside its JSON body instead of through the status code.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tracing::{error, info};

use crate::config::Config;
use crate::store::{self, UsersResponse};

/// Greeting served on `/` and every unmatched path.
pub const GREETING_BODY: &str = "<h1>Hola Mundo</h1>";

/// Body of the three probe endpoints.
pub const PROBE_BODY: &str = "OK";

/// Content type for the user listing; axum's `Json` default lacks the charset.
const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database settings for the per-request store reader.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new app state.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Log receipt and path for every inbound request.
pub async fn log_request(request: Request, next: Next) -> Response {
    info!("{} request received", request.method());
    info!("path: {}", request.uri().path());
    next.run(request).await
}

/// Startup probe handler.
pub async fn startup() -> impl IntoResponse {
    info!("startup probe called");
    Html(PROBE_BODY)
}

/// Liveness probe handler.
pub async fn liveness() -> impl IntoResponse {
    info!("liveness probe called");
    Html(PROBE_BODY)
}

/// Readiness probe handler.
pub async fn readiness() -> impl IntoResponse {
    info!("readiness probe called");
    Html(PROBE_BODY)
}

/// User listing handler.
pub async fn users(State(state): State<AppState>) -> impl IntoResponse {
    info!("users endpoint called");

    let payload = match store::fetch_users(&state.config).await {
        Ok(users) => UsersResponse::Users { users },
        Err(err) => {
            error!("user listing failed: {}", err);
            UsersResponse::Error {
                error: err.to_string(),
            }
        }
    };

    ([(header::CONTENT_TYPE, JSON_UTF8)], Json(payload))
}

/// Fallback handler: greets on `/` and any unknown path.
pub async fn greeting() -> impl IntoResponse {
    info!("greeting route called");
    Html(GREETING_BODY)
}
