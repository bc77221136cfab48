/**
 * Payload Validation
 *
 * Request bodies are deserialized into "raw" structs whose fields are all
 * optional, then converted into their validated form through `Validate`.
 * Keeping the raw form lenient lets us report which field is missing instead
 * of surfacing a generic deserialization error.
 */

use std::sync::LazyLock;

use regex::Regex;

use crate::shared::SharedError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Conversion of a raw payload into its validated form
pub trait Validate {
    /// The payload after every rule has been checked
    type Valid;

    /// Check every rule and produce the validated value
    fn validate(self) -> Result<Self::Valid, SharedError>;
}

/// Check that a string looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Require a non-empty string field
pub fn require_string(field: &str, value: Option<String>) -> Result<String, SharedError> {
    let value = value.ok_or_else(|| SharedError::required(field))?;
    non_empty(field, value)
}

/// Reject a present but blank string field
pub fn non_empty(field: &str, value: String) -> Result<String, SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, "is not allowed to be empty"));
    }
    Ok(trimmed.to_string())
}

/// Require a well-formed email, kept as given
pub fn require_email(field: &str, value: Option<String>) -> Result<String, SharedError> {
    let value = require_string(field, value)?;
    email(field, value)
}

/// Require a well-formed account email, normalized to lower case
///
/// Accounts are looked up by email, so `A@X.com` and `a@x.com` must agree.
pub fn require_account_email(field: &str, value: Option<String>) -> Result<String, SharedError> {
    require_email(field, value).map(|email| email.to_lowercase())
}

/// Validate an email that is already known to be present
pub fn email(field: &str, value: String) -> Result<String, SharedError> {
    let value = non_empty(field, value)?;
    if !is_valid_email(&value) {
        return Err(SharedError::validation(field, "must be a valid email"));
    }
    Ok(value)
}
