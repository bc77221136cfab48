//! Backend Error Module
//!
//! This module defines the error type used by every handler and its
//! conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation and 404 fallback
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use contactbook::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<serde_json::Value>, BackendError> {
//!     Err(BackendError::not_found("Contact not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, OPAQUE_SERVER_ERROR};
