/**
 * Email Verification Handlers
 *
 * - `GET /auth/verify/{code}` confirms the address holding `code`
 * - `POST /auth/verify` re-sends the link for an unverified address
 *
 * A code is single use: verification clears it, so following the same link
 * twice yields 404 the second time.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{MessageResponse, ResendVerificationRequest};
use crate::backend::error::BackendError;
use crate::backend::mail::verification_email;
use crate::backend::middleware::Validated;
use crate::backend::server::state::AppState;

const USER_NOT_FOUND: &str = "User not found";
const ALREADY_VERIFIED: &str = "Verification has already been passed";

/// Confirm an email address
///
/// # Errors
///
/// * `404 Not Found` - no user holds this code
pub async fn verify_email(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let user = app_state
        .users
        .verify_by_code(&code)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Unknown verification code");
            BackendError::not_found(USER_NOT_FOUND)
        })?;

    tracing::info!("Email verified: {}", user.email);

    Ok(Json(MessageResponse::new("Verification successful")))
}

/// Send the verification link again
///
/// The existing code is reused, so a link from an earlier email still works.
///
/// # Errors
///
/// * `400 Bad Request` - missing or malformed email, or already verified
/// * `404 Not Found` - no user with this email
/// * `500 Internal Server Error` - mail delivery failed
pub async fn resend_verification(
    State(app_state): State<AppState>,
    Validated(email): Validated<ResendVerificationRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let user = app_state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;

    let code = match (&user.verification_code, user.verified) {
        (Some(code), false) => code,
        _ => return Err(BackendError::bad_request(ALREADY_VERIFIED)),
    };

    let message = verification_email(&user.email, &app_state.config.public_base_url, code);
    app_state.mailer.send(message).await?;

    tracing::info!("Verification email re-sent to {}", user.email);

    Ok(Json(MessageResponse::new("Verification email sent")))
}
