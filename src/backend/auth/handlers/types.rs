/**
 * Authentication Handler Types
 *
 * Request and response types shared by the authentication handlers.
 * Request bodies use optional fields and are checked through `Validate`, so a
 * missing field is reported by name.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::{Subscription, User};
use crate::shared::validation::{self, Validate};
use crate::shared::SharedError;

/// Sign up request
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Optional starting tier, `starter` when absent
    pub subscription: Option<String>,
}

/// Validated signup payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub email: String,
    pub password: String,
    pub subscription: Subscription,
}

impl Validate for SignupRequest {
    type Valid = Signup;

    fn validate(self) -> Result<Signup, SharedError> {
        let subscription = match self.subscription {
            Some(value) => value.parse().map_err(|_| {
                SharedError::validation("subscription", "must be one of [starter, pro, business]")
            })?,
            None => Subscription::default(),
        };

        Ok(Signup {
            email: validation::require_account_email("email", self.email)?,
            password: require_password(self.password)?,
            subscription,
        })
    }
}

/// Sign in request
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated sign in payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for SigninRequest {
    type Valid = Credentials;

    fn validate(self) -> Result<Credentials, SharedError> {
        Ok(Credentials {
            email: validation::require_account_email("email", self.email)?,
            password: require_password(self.password)?,
        })
    }
}

/// Resend verification request
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ResendVerificationRequest {
    pub email: Option<String>,
}

impl Validate for ResendVerificationRequest {
    type Valid = String;

    fn validate(self) -> Result<String, SharedError> {
        validation::require_account_email("email", self.email)
    }
}

/// Subscription change request
///
/// The tier is parsed by the handler so that every bad value, including a
/// missing one, gets the same message.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionRequest {
    pub subscription: Option<String>,
}

/// Passwords are kept verbatim, only emptiness is rejected
fn require_password(password: Option<String>) -> Result<String, SharedError> {
    let password = password.ok_or_else(|| SharedError::required("password"))?;
    if password.is_empty() {
        return Err(SharedError::validation("password", "is not allowed to be empty"));
    }
    Ok(password)
}

/// Public projection of a user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub email: String,
    pub subscription: Subscription,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            subscription: user.subscription,
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// `{"user": ...}` wrapper used by signup, subscription and avatar updates
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

impl From<&User> for UserEnvelope {
    fn from(user: &User) -> Self {
        Self { user: user.into() }
    }
}

/// Sign in response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: UserResponse,
}

/// Current user response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CurrentUserResponse {
    pub email: String,
    pub subscription: Subscription,
}

/// Plain `{"message": ...}` response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
