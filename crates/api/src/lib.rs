//! HTTP surface of the lost-and-found board: the storage endpoint, the
//! flag collection and the admin dashboard endpoints.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Router with body limit, tracing and CORS layers applied.
pub fn build_app(state: AppState) -> Router {
    let body_limit = state.config().max_body_bytes;
    routes::build_router(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer())
}
