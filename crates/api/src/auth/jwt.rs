//! JWT validation for bearer identity tokens
//!
//! Tokens are issued by the upstream auth gateway; this service only
//! validates them and resolves the subject. `generate_token` exists for
//! the resolver's tests and local seeding.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Claims carried by a bearer identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Email at issue time
    pub email: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// JWT manager for token operations
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Generate an identity token for a user
    pub fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, JwtError> {
        let now = OffsetDateTime::now_utc();
        let exp = now + Duration::hours(self.expiry_hours);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.unix_timestamp(),
            exp: exp.unix_timestamp(),
        };

        // Explicit algorithm prevents algorithm confusion attacks
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 60; // 60 second clock skew tolerance

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidToken => JwtError::Invalid,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => JwtError::Invalid,
                _ => JwtError::Validation(e.to_string()),
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Token encoding failed: {0}")]
    Encoding(String),
    #[error("Token validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation_and_validation() {
        let jwt = JwtManager::new("test-secret-key-at-least-32-chars!", 24);
        let user_id = Uuid::new_v4();

        let token = jwt
            .generate_token(user_id, "bender@example.test")
            .expect("Failed to generate token");

        let claims = jwt.validate_token(&token).expect("Invalid token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "bender@example.test");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = JwtManager::new("first-secret-key-at-least-32-chars", 24);
        let verifier = JwtManager::new("other-secret-key-at-least-32-chars", 24);

        let token = issuer
            .generate_token(Uuid::new_v4(), "jim@example.test")
            .expect("Failed to generate token");

        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt = JwtManager::new("test-secret-key-at-least-32-chars!", 24);
        assert!(jwt.validate_token("not-a-jwt").is_err());
    }
}
