//! API routes

pub mod cards;
pub mod deluxe;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};

use crate::{auth::require_auth, security::security_headers_middleware, state::AppState};

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    let auth_state = state.auth_state();

    // Health probes stay public for infrastructure monitoring
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    // Protected storefront routes (bearer token required)
    let protected_routes = Router::new()
        .route(
            "/rest/deluxe-membership",
            get(deluxe::membership_status).post(deluxe::upgrade_membership),
        )
        .route("/api/Cards", get(cards::list_cards))
        .layer(middleware::from_fn_with_state(auth_state, require_auth));

    Router::new()
        .merge(health_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(security_headers_middleware))
        // Request bodies here are tiny; anything large is abuse
        .layer(DefaultBodyLimit::max(64 * 1024))
        .with_state(state)
}
