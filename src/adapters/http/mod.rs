//! HTTP adapters - REST API implementations.
//!
//! `app_router` nests the session endpoints under `/api/sessions` and wraps
//! them in the tracing, CORS and timeout layers.

pub mod session;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::RegistrationService;
use crate::config::{CorsOrigins, ServerConfig};

pub use session::{session_routes, SessionHandlers};

/// Builds the full application router.
pub fn app_router(service: Arc<RegistrationService>, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api/sessions", session_routes(SessionHandlers::new(service)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(server.allowed_origins()))
                .layer(TimeoutLayer::new(server.request_timeout())),
        )
}

fn cors_layer(origins: CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let origins = match origins {
        CorsOrigins::Any => return layer.allow_origin(Any),
        CorsOrigins::List(origins) => origins,
    };
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(parsed)
}
