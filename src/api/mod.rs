//! HTTP API module for the greeting page, probes, and user listing.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
