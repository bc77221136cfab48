/**
 * Backend Error Types
 *
 * This module defines the error type returned by every handler, extractor
 * and middleware in the backend.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Domain failures raised directly by handlers, each carrying its own status:
 * - 409 Conflict (duplicate email)
 * - 401 Unauthorized (bad credentials, missing or stale token)
 * - 400 Bad Request (invalid enum value, already verified)
 * - 404 Not Found (unknown user, contact or verification code)
 *
 * ## Validation Errors
 *
 * Payload and identifier failures from the shared validation layer (400).
 *
 * ## Internal Errors
 *
 * Failures of the collaborators the backend delegates to: the record store,
 * the mail transport, avatar processing, token signing and password hashing.
 * They are logged and rendered as an opaque 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::avatars::AvatarError;
use crate::backend::mail::MailError;
use crate::backend::store::RepositoryError;
use crate::shared::SharedError;

/// Message returned to clients for every 5xx response
pub const OPAQUE_SERVER_ERROR: &str = "Server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use contactbook::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Contact not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Domain error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Payload or identifier validation error
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Record store failure
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Outbound email failure
    #[error(transparent)]
    Mail(#[from] MailError),

    /// Avatar processing failure
    #[error(transparent)]
    Avatar(#[from] AvatarError),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - `Repository` - 409 for unique violations, otherwise 500
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Repository(RepositoryError::Conflict { .. }) => StatusCode::CONFLICT,
            Self::Repository(_)
            | Self::Mail(_)
            | Self::Avatar(_)
            | Self::Token(_)
            | Self::Hash(_)
            | Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message that is safe to show to clients
    ///
    /// Internal failures collapse to [`OPAQUE_SERVER_ERROR`]; the details
    /// only go to the server log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Repository(RepositoryError::Conflict { message }) => message.clone(),
            _ => OPAQUE_SERVER_ERROR.to_string(),
        }
    }

    /// Whether this error should be logged as a server fault
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}
