use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::{ApiConfig, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Builds the service router with CORS, body limit and request tracing.
pub fn build_router(
    state: AppState,
    config: &ApiConfig,
) -> Router {
    let router = Router::new()
        .route("/api/salary/calculate", post(handlers::calculate))
        .route("/api/salary/upload", post(handlers::upload))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes));

    let router = match cors_layer(&config.cors) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if !config.enabled {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return Some(layer.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(layer.allow_origin(AllowOrigin::list(origins)))
}
