use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Any origin, the CRUD verbs, any header. The storage endpoint is public.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers(Any)
}
