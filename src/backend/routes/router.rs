/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Auth routes
 * 2. Contact routes
 * 3. Static avatars
 * 4. Fallback handler (JSON 404)
 *
 * The whole router is wrapped in tower-http's `TraceLayer`, so every request
 * gets a span with method, path, status and latency.
 */

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::avatars::AVATARS_URL_PREFIX;
use crate::backend::error::conversion::not_found_fallback;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::contact_routes::configure_contact_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_api_routes(router, &app_state);
    let router = configure_contact_routes(router, &app_state);

    // Uploaded avatars
    let router = router.nest_service(
        AVATARS_URL_PREFIX,
        ServeDir::new(app_state.avatars.avatars_dir()),
    );

    let router = router.fallback(not_found_fallback);

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
