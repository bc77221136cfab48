/**
 * Authentication Routes
 *
 * ## Public
 * - `POST /auth/signup` - User registration
 * - `GET /auth/verify/{code}` - Email verification link
 * - `POST /auth/verify` - Resend the verification email
 * - `POST /auth/signin` - Sign in, returns a session token
 *
 * ## Authenticated
 * - `GET /auth/current` - Current user
 * - `POST /auth/signout` - End the session
 * - `PATCH /auth/subscription` - Change subscription tier
 * - `PATCH /auth/avatars` - Upload a new avatar
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::backend::auth::{
    current, resend_verification, signin, signout, signup, update_subscription, verify_email,
};
use crate::backend::avatars::update_avatar;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure authentication routes
///
/// The avatar route gets its own body limit from `max_avatar_bytes`.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/current", get(current))
        .route("/auth/signout", post(signout))
        .route("/auth/subscription", patch(update_subscription))
        .route(
            "/auth/avatars",
            patch(update_avatar).layer(DefaultBodyLimit::max(app_state.config.max_avatar_bytes)),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router
        .route("/auth/signup", post(signup))
        .route("/auth/verify/{code}", get(verify_email))
        .route("/auth/verify", post(resend_verification))
        .route("/auth/signin", post(signin))
        .merge(protected)
}
