/**
 * Session Tokens
 *
 * JWT issuing and verification. A token only proves who signed in and when;
 * whether it is still the user's *current* session is decided by comparing
 * it with the token stored on the user record (see `middleware::auth`).
 */

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Unique token ID, so two signins in the same second differ
    pub jti: String,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Signing keys and token lifetime
#[derive(Clone)]
pub struct SessionKeys {
    keys: Arc<Keys>,
    ttl: Duration,
}

impl SessionKeys {
    /// Build keys from an HMAC secret and a token lifetime in minutes
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Create a signed token for a user
    pub fn create_token(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let token_data = decode::<Claims>(token, &self.keys.decoding, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and extract the user ID
    pub fn user_id_from_token(&self, token: &str) -> Option<Uuid> {
        let claims = self
            .verify_token(token)
            .map_err(|e| tracing::debug!("Token verification failed: {}", e))
            .ok()?;
        Uuid::parse_str(&claims.sub).ok()
    }
}
