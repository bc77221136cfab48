/**
 * Subscription Handler
 *
 * PATCH /auth/subscription changes the caller's tier. Setting the tier the
 * user already has is accepted and returns the same projection.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{SubscriptionRequest, UserEnvelope};
use crate::backend::auth::users::Subscription;
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, JsonBody};
use crate::backend::server::state::AppState;

/// Update the caller's subscription tier
///
/// # Errors
///
/// * `400 Bad Request` - "Invalid subscription value." for anything but
///   `starter`, `pro` or `business`
/// * `404 Not Found` - the user was deleted after authenticating
pub async fn update_subscription(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<SubscriptionRequest>,
) -> Result<Json<UserEnvelope>, BackendError> {
    let subscription: Subscription = request
        .subscription
        .unwrap_or_default()
        .parse()
        .map_err(|e| {
            tracing::warn!("Rejected subscription change for user {}", user.id);
            BackendError::bad_request(format!("{e}"))
        })?;

    let updated = app_state
        .users
        .set_subscription(user.id, subscription)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found."))?;

    tracing::info!("Subscription for {} set to {}", updated.email, subscription);

    Ok(Json(UserEnvelope::from(&updated)))
}
