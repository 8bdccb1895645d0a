//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Read-only dashboard API, any origin may call it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let metrics = Router::new()
        .route("/vessels/total", get(handlers::total_vessels))
        .route("/vessels/navigating", get(handlers::navigating_vessels))
        .route("/consumption/monthly", get(handlers::monthly_consumption))
        .route("/navigation/daily", get(handlers::daily_navigation))
        .route("/compliance", get(handlers::compliance))
        .route("/biofouling-risk", get(handlers::biofouling_risk))
        .route("/inspections", get(handlers::inspections));

    let api_v1 = Router::new()
        .nest("/metrics", metrics)
        .route("/weather/{ship_name}", get(handlers::vessel_weather))
        .route("/reload", post(handlers::reload));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(AppConfig::default(), None).unwrap();
        let _router = create_router(state);
    }
}
