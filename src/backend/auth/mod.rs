//! Authentication Module
//!
//! This module handles user registration, email verification, sign in and
//! session management.
//!
//! # Architecture
//!
//! - **`users`** - User record and subscription tiers
//! - **`sessions`** - JWT token generation and validation
//! - **`passwords`** - bcrypt hashing on the blocking pool
//! - **`gravatar`** - Default avatar URLs and verification codes
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model
//! ├── sessions.rs     - JWT token management
//! ├── passwords.rs    - Password hashing
//! ├── gravatar.rs     - Identicons and verification codes
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Sessions
//!
//! A user has at most one live session: signing in stores the new token on
//! the user record and signing out clears it. The middleware accepts a token
//! only while it is the stored one.

/// User data model
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod passwords;

/// Identicons and verification codes
pub mod gravatar;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{
    current, resend_verification, signin, signout, signup, update_subscription, verify_email,
};
pub use sessions::SessionKeys;
pub use users::{Subscription, User};
