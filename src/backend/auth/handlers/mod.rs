//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs          - Module exports and documentation
//! ├── types.rs        - Request and response types
//! ├── signup.rs       - User registration
//! ├── verify.rs       - Email verification and resend
//! ├── login.rs        - Sign in
//! ├── me.rs           - Current user and sign out
//! └── subscription.rs - Subscription tier changes
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /auth/signup
//! - **`verify_email`** - GET /auth/verify/{code}
//! - **`resend_verification`** - POST /auth/verify
//! - **`signin`** - POST /auth/signin
//! - **`current`** - GET /auth/current (authenticated)
//! - **`signout`** - POST /auth/signout (authenticated)
//! - **`update_subscription`** - PATCH /auth/subscription (authenticated)
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email and password → unverified user + verification email
//! 2. **Verify**: link from the email → user verified
//! 3. **Signin**: email and password → token stored on the user and returned
//! 4. **Signout**: stored token cleared → token no longer accepted

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Verification handlers
pub mod verify;

/// Signin handler
pub mod login;

/// Current user and signout handlers
pub mod me;

/// Subscription handler
pub mod subscription;

pub use types::{AuthResponse, MessageResponse, UserEnvelope, UserResponse};

pub use login::signin;
pub use me::{current, signout};
pub use signup::signup;
pub use subscription::update_subscription;
pub use verify::{resend_verification, verify_email};
