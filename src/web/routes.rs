//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.settings.server.cors_origins);

    Router::new()
        .route("/search", post(handlers::search))
        .route("/web_search", post(handlers::web_search))
        .route("/image_search", post(handlers::image_search))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from the configured allow-list. A "*" entry selects
/// the permissive wildcard layer.
fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
