//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
///
/// Each method router carries its own not-found fallback so a wrong method
/// on a known path gets the same 404 body as an unknown path, not a bare
/// 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health).fallback(handlers::not_found))
        .route(
            "/extract",
            post(handlers::extract).fallback(handlers::not_found),
        )
        .route(
            "/pricing/scrape",
            post(handlers::pricing_scrape).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
