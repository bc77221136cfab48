/**
 * User Model
 *
 * The user record, its subscription tier and the public projection handed
 * back to clients. Persistence lives behind `store::UserRepository`.
 */

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    /// Default tier for new accounts
    #[default]
    Starter,
    /// Paid tier
    Pro,
    /// Team tier
    Business,
}

/// Raised when a string is not one of the three tiers
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid subscription value.")]
pub struct InvalidSubscription;

impl Subscription {
    /// Every accepted tier
    pub const ALL: [Subscription; 3] = [Self::Starter, Self::Pro, Self::Business];

    /// Storage and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Business => "business",
        }
    }
}

impl FromStr for Subscription {
    type Err = InvalidSubscription;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == value)
            .ok_or(InvalidSubscription)
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record as stored
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Email address, trimmed and lower-cased
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Current subscription tier
    pub subscription: Subscription,
    /// Public avatar URL (identicon until an upload replaces it)
    pub avatar_url: String,
    /// Whether the email address has been confirmed
    pub verified: bool,
    /// Pending verification code, `None` once verified
    pub verification_code: Option<String>,
    /// The single active session token, `None` when signed out
    pub access_token: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether `token` is the session currently stored for this user
    pub fn holds_token(&self, token: &str) -> bool {
        self.access_token.as_deref() == Some(token)
    }
}

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub subscription: Subscription,
    pub avatar_url: String,
    pub verification_code: String,
}

impl NewUser {
    /// Materialize the stored record with a fresh identifier
    pub fn into_user(self, id: Uuid, now: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            subscription: self.subscription,
            avatar_url: self.avatar_url,
            verified: false,
            verification_code: Some(self.verification_code),
            access_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}
