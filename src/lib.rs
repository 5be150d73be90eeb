use std::sync::Arc;

use axum::{middleware, routing::get, Router};

pub mod autodiscover;
pub mod config;
pub mod errors;
pub mod http;
pub mod logging;

use config::ServiceConfig;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(service: ServiceConfig) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Every path except the health probe is answered by the autodiscover handler,
/// whatever the method.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .fallback(http::handlers::autodiscover)
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
