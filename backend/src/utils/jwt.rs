//! JWT token utilities for authentication.
//!
//! Tokens are self-contained: a claim set of username and expiry, signed with
//! HS256. Validity is purely a function of signature and expiry at
//! verification time; nothing is stored server-side and verification never
//! touches the database.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::AuthError;

/// The claim set encoded inside a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username of the authenticated identity
    pub username: String,
    /// Token expiration timestamp (Unix seconds)
    pub exp: i64,
}

/// Token issue/verify engine, built once from configuration and shared.
#[derive(Clone)]
pub struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtKeys {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_minutes)
    }

    /// Issues a signed token for `username`, expiring one TTL from now.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let claims = Claims {
            username: username.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Malformed(e.to_string()))
    }

    /// Decodes and verifies a token, yielding its claims.
    ///
    /// Failure kinds stay distinct (expired vs. bad signature vs. anything
    /// unparsable) so logs can tell them apart; callers collapse them all to
    /// an unauthorized response.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::BadSignature,
                _ => AuthError::Malformed(e.to_string()),
            })
    }
}

/// Extracts the token from an Authorization header value.
///
/// Only the exact shape `Bearer <token>` is accepted: one space, two parts,
/// the first being the literal scheme. Anything else is malformed before any
/// signature work happens.
pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::Malformed(
            "authorization header is not of the form 'Bearer <token>'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new("test-secret", 200)
    }

    #[test]
    fn issue_then_verify_roundtrip() {
        let keys = keys();
        let token = keys.issue("alice").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn expired_token_is_rejected() {
        // A non-positive TTL simulates verification after the expiry instant.
        let keys = JwtKeys::new("test-secret", -1);
        let token = keys.issue("alice").unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn wrong_secret_is_a_bad_signature() {
        let token = keys().issue("alice").unwrap();
        let other = JwtKeys::new("other-secret", 200);
        assert!(matches!(other.verify(&token), Err(AuthError::BadSignature)));
    }

    #[test]
    fn garbage_token_is_malformed() {
        assert!(matches!(
            keys().verify("not-a-jwt"),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn bearer_extraction_requires_exact_shape() {
        assert_eq!(extract_bearer_token("Bearer abc").unwrap(), "abc");

        for bad in [
            "",
            "abc",
            "Bearer",
            "Bearer ",
            "bearer abc",
            "Basic abc",
            "Bearer abc extra",
            "Bearer  abc",
        ] {
            assert!(
                matches!(extract_bearer_token(bad), Err(AuthError::Malformed(_))),
                "accepted {bad:?}"
            );
        }
    }
}
