/**
 * Current User and Signout Handlers
 *
 * Both run behind the authentication middleware, which has already matched
 * the bearer token against the one stored on the user.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{CurrentUserResponse, MessageResponse};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

/// GET /auth/current
pub async fn current(AuthUser(user): AuthUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        email: user.email,
        subscription: user.subscription,
    })
}

/// POST /auth/signout
///
/// Clears the stored session token, so the token that made this request is
/// rejected from now on.
pub async fn signout(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    app_state.users.set_access_token(user.id, None).await?;

    tracing::info!("User signed out: {}", user.email);

    Ok(Json(MessageResponse::new("Signout success")))
}
