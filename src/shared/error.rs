//! Shared Error Types
//!
//! Errors raised while validating request payloads and path parameters.
//! Every variant maps to `400 Bad Request` once it reaches the HTTP layer.
//!
//! # Error Categories
//!
//! - `ValidationError` - A single field failed a schema rule
//! - `EmptyPayload` - An update body carried no fields at all
//! - `InvalidIdentifier` - A path segment is not a well-formed identifier
//!
//! # Usage
//!
//! ```rust
//! use contactbook::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "must be a valid email");
//! assert_eq!(error.to_string(), "\"email\" must be a valid email");
//! ```
use thiserror::Error;

/// Validation failures shared by every payload type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A field is missing, has the wrong shape, or breaks a format rule
    #[error("\"{field}\" {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// An update payload without a single field
    #[error("missing fields")]
    EmptyPayload,

    /// Path identifier that cannot be parsed
    #[error("{value} is not a valid id")]
    InvalidIdentifier {
        /// The raw path segment
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a missing required field
    pub fn required(field: impl Into<String>) -> Self {
        Self::validation(field, "is required")
    }

    /// Create a new invalid identifier error
    pub fn invalid_identifier(value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
        }
    }
}
