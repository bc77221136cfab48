//! Default avatars and verification codes.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";
const VERIFICATION_CODE_LEN: usize = 21;

/// Deterministic identicon URL for an email address
///
/// Gravatar accepts a SHA-256 of the trimmed, lower-cased address.
pub fn identicon_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = hex::encode(Sha256::digest(normalized.as_bytes()));
    format!("{GRAVATAR_BASE}/{digest}?s=200&r=pg&d=identicon")
}

/// Random URL-safe verification code
pub fn verification_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(VERIFICATION_CODE_LEN)
        .map(char::from)
        .collect()
}
