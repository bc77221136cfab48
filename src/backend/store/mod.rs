//! Persistence Module
//!
//! Repository traits for user and contact records, plus the two adapters
//! that implement them.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Repository traits and RepositoryError
//! ├── postgres.rs - sqlx/PostgreSQL adapter (used when DATABASE_URL is set)
//! └── memory.rs   - In-process adapter (development and tests)
//! ```
//!
//! # Invariants
//!
//! Both adapters enforce email uniqueness themselves and report a duplicate
//! as [`RepositoryError::Conflict`]. Callers never pre-check: the insert is
//! the only authority on whether an email is taken.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::{NewUser, Subscription, User};
use crate::backend::contacts::types::{Contact, ContactPatch, NewContact};

/// In-memory adapter
pub mod memory;

/// PostgreSQL adapter
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence errors raised by repository adapters
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write
    #[error("{message}")]
    Conflict {
        /// Client-facing description of the duplicate
        message: String,
    },

    /// Connection could not be established
    #[error("record store connection failed: {message}")]
    Connection {
        /// Underlying driver message
        message: String,
    },

    /// Query or mutation failed during execution
    #[error("record store query failed: {message}")]
    Query {
        /// Underlying driver message
        message: String,
    },
}

impl RepositoryError {
    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a query error
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Message used for duplicate-email conflicts by every adapter
pub const EMAIL_IN_USE: &str = "Email already in use";

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; fails with `Conflict` when the email is taken
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Fetch a user by identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Mark the holder of `code` as verified and clear the code
    ///
    /// Returns `None` when no user holds that exact code.
    async fn verify_by_code(&self, code: &str) -> Result<Option<User>, RepositoryError>;

    /// Replace (or clear, with `None`) the current session token
    async fn set_access_token(
        &self,
        id: Uuid,
        token: Option<&str>,
    ) -> Result<(), RepositoryError>;

    /// Change the subscription tier
    async fn set_subscription(
        &self,
        id: Uuid,
        subscription: Subscription,
    ) -> Result<Option<User>, RepositoryError>;

    /// Change the avatar URL
    async fn set_avatar_url(&self, id: Uuid, url: &str) -> Result<Option<User>, RepositoryError>;
}

/// Contact persistence
///
/// Every lookup takes an optional `owner`. `None` means the query is not
/// restricted to a single owner.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// List contacts, oldest first
    async fn list(&self, owner: Option<Uuid>) -> Result<Vec<Contact>, RepositoryError>;

    /// Fetch one contact
    async fn find_by_id(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> Result<Option<Contact>, RepositoryError>;

    /// Insert a contact owned by `owner`
    async fn insert(&self, owner: Uuid, contact: NewContact) -> Result<Contact, RepositoryError>;

    /// Apply a partial update; only `Some` fields change
    async fn update(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        patch: ContactPatch,
    ) -> Result<Option<Contact>, RepositoryError>;

    /// Delete a contact, returning it if it existed
    async fn delete(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> Result<Option<Contact>, RepositoryError>;
}
