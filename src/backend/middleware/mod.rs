//! Middleware Module
//!
//! Request-level plumbing shared by the route handlers.
//!
//! - **`auth`** - bearer token middleware and the `AuthUser` extractor
//! - **`validation`** - JSON, validated-payload and path-id extractors

/// Authentication middleware
pub mod auth;

/// Request extractors
pub mod validation;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use validation::{JsonBody, ValidId, Validated};
