/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate email, password and the optional subscription tier
 * 2. Hash the password using bcrypt
 * 3. Insert the user, unverified, with an identicon avatar and a fresh
 *    verification code
 * 4. Email the verification link
 * 5. Return the public projection of the user
 *
 * # Uniqueness
 *
 * There is no lookup before the insert. The store rejects a duplicate email
 * with a conflict, which becomes 409 "Email already in use".
 *
 * # Email Delivery
 *
 * Once the user is stored, a failed send is logged and the signup still
 * succeeds; POST /auth/verify re-sends the link.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::gravatar::{identicon_url, verification_code};
use crate::backend::auth::handlers::types::{SignupRequest, UserEnvelope};
use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::users::NewUser;
use crate::backend::error::BackendError;
use crate::backend::mail::verification_email;
use crate::backend::middleware::Validated;
use crate::backend::server::state::AppState;
use crate::backend::store::RepositoryError;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - missing or malformed email/password, unknown tier
/// * `409 Conflict` - email already registered
/// * `500 Internal Server Error` - hashing or storage failure
///
/// # Example Request
///
/// ```http
/// POST /auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "pw123" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "user": {
///     "email": "user@example.com",
///     "subscription": "starter",
///     "avatarURL": "https://www.gravatar.com/avatar/...?s=200&r=pg&d=identicon"
///   }
/// }
/// ```
pub async fn signup(
    State(app_state): State<AppState>,
    Validated(request): Validated<SignupRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>), BackendError> {
    tracing::info!("Signup request for email: {}", request.email);

    let password_hash = hash_password(request.password, app_state.config.bcrypt_cost).await?;
    let code = verification_code();

    let user = app_state
        .users
        .insert(NewUser {
            avatar_url: identicon_url(&request.email),
            email: request.email,
            password_hash,
            subscription: request.subscription,
            verification_code: code.clone(),
        })
        .await
        .map_err(|e| {
            if let RepositoryError::Conflict { .. } = e {
                tracing::warn!("Signup rejected, email already in use");
            }
            e
        })?;

    tracing::info!("User created successfully: {} ({})", user.email, user.id);

    let email = verification_email(&user.email, &app_state.config.public_base_url, &code);
    if let Err(e) = app_state.mailer.send(email).await {
        tracing::error!("Failed to send verification email to {}: {}", user.email, e);
    }

    Ok((StatusCode::CREATED, Json(UserEnvelope::from(&user))))
}
