pub mod health;
pub mod rate_limit;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::Config;
use crate::scholarships::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let search = Router::new()
        .route("/api/scholarships/search", post(handlers::handle_search))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(search)
        .with_state(state)
}

/// CORS for the configured origins; permissive when none are configured.
pub fn cors_layer(config: &Config) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
