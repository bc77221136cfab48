//! Shared Module
//!
//! Types used by more than one backend module. Right now that is the payload
//! validation layer: the `Validate` trait every request body implements and
//! the `SharedError` it reports failures with.

/// Shared error types
pub mod error;

/// Payload validation helpers
pub mod validation;

pub use error::SharedError;
pub use validation::Validate;
