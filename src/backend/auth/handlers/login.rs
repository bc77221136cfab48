/**
 * Signin Handler
 *
 * This module implements the handler for POST /auth/signin.
 *
 * # Authentication Process
 *
 * 1. Look up the user by email
 * 2. Verify the password against the stored bcrypt hash
 * 3. Require a verified email
 * 4. Issue a session token and store it on the user, replacing any earlier
 *    session
 *
 * # Security
 *
 * Unknown email and wrong password share one message, so the response does
 * not reveal which accounts exist. The verification check runs only after
 * the password matched.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, SigninRequest};
use crate::backend::auth::passwords::verify_password;
use crate::backend::error::BackendError;
use crate::backend::middleware::Validated;
use crate::backend::server::state::AppState;

const WRONG_CREDENTIALS: &str = "Email or password is wrong";
const NOT_VERIFIED: &str = "Email is not verified";

/// Sign in handler
///
/// # Errors
///
/// * `400 Bad Request` - missing or malformed email/password
/// * `401 Unauthorized` - wrong credentials or unverified email
/// * `500 Internal Server Error` - storage or token failure
///
/// # Example Response
///
/// ```json
/// {
///   "accessToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "email": "user@example.com", "subscription": "starter", "avatarURL": "..." }
/// }
/// ```
pub async fn signin(
    State(app_state): State<AppState>,
    Validated(credentials): Validated<SigninRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Signin request for email: {}", credentials.email);

    let Some(user) = app_state.users.find_by_email(&credentials.email).await? else {
        tracing::warn!("Signin for unknown email");
        return Err(BackendError::unauthorized(WRONG_CREDENTIALS));
    };

    if !verify_password(credentials.password, user.password_hash.clone()).await? {
        tracing::warn!("Invalid password for user {}", user.id);
        return Err(BackendError::unauthorized(WRONG_CREDENTIALS));
    }

    if !user.verified {
        tracing::warn!("Signin before verification for user {}", user.id);
        return Err(BackendError::unauthorized(NOT_VERIFIED));
    }

    let token = app_state.sessions.create_token(user.id)?;
    app_state
        .users
        .set_access_token(user.id, Some(&token))
        .await?;

    tracing::info!("User signed in: {}", user.email);

    Ok(Json(AuthResponse {
        access_token: token,
        user: (&user).into(),
    }))
}
