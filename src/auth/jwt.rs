// src/auth/jwt.rs

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub exp: i64,    // expiration timestamp
    pub iat: i64,    // issued at timestamp
}

/// Signs and verifies session tokens with a process-wide HS256 key.
///
/// A token is valid iff its signature verifies and `now < exp`. Nothing is
/// persisted, so a token stays valid until it expires.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn issue(&self, user_id: &str) -> AuthResult<String> {
        self.issue_at(user_id, chrono::Utc::now().timestamp())
    }

    pub fn issue_at(&self, user_id: &str, now: i64) -> AuthResult<String> {
        let exp = now
            .checked_add(self.ttl_secs)
            .ok_or_else(|| AuthError::internal("Failed to calculate expiration"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::internal(format!("Failed to create token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> AuthResult<Claims> {
        // Expiry is checked below against the caller's clock, with no leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::ImmatureSignature
                | ErrorKind::MissingRequiredClaim(_)
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => AuthError::InvalidToken,
                _ => AuthError::internal(format!("Token verification failed: {}", e)),
            })?;

        if now >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}
