/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. It extracts
 * the bearer token from the Authorization header, verifies it, and checks
 * that it is still the session stored on the user record. A signed-out or
 * superseded token therefore stops working immediately, even before it
 * expires.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::users::{Subscription, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Message for every authentication failure
pub const NOT_AUTHORIZED: &str = "Not authorized";

/// The caller, as resolved by [`auth_middleware`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub subscription: Subscription,
    pub avatar_url: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            subscription: user.subscription,
            avatar_url: user.avatar_url.clone(),
        }
    }
}

fn not_authorized() -> BackendError {
    BackendError::unauthorized(NOT_AUTHORIZED)
}

/// Extract `<token>` from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme == "Bearer" && !token.is_empty()).then_some(token)
}

/// Authentication middleware
///
/// 1. Extracts the bearer token
/// 2. Verifies signature and expiry
/// 3. Loads the user named by the token subject
/// 4. Requires the token to equal the one stored on the user
/// 5. Attaches an [`AuthenticatedUser`] to the request extensions
///
/// Any failure is a 401 "Not authorized".
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())
        .map(str::to_string)
        .ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            not_authorized()
        })?;

    let user_id = app_state
        .sessions
        .user_id_from_token(&token)
        .ok_or_else(not_authorized)?;

    let user = app_state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject {} no longer exists", user_id);
            not_authorized()
        })?;

    if !user.holds_token(&token) {
        tracing::warn!("Stale session token presented for user {}", user_id);
        return Err(not_authorized());
    }

    request.extensions_mut().insert(AuthenticatedUser::from(&user));

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only succeeds on routes behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                not_authorized()
            })?;

        Ok(AuthUser(user))
    }
}
