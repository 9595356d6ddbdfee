//! Stateless bearer-token issuance and verification.

use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cartwheel_core::UserId;

/// Errors surfaced to clients verbatim, so the wording matters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired. Please login again.")]
    Expired,

    #[error("Invalid token. Please login again.")]
    Invalid,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id, stringified.
    sub: String,
    /// Expiry as a unix timestamp.
    exp: i64,
}

/// Signs and verifies HS256 tokens carrying a user id.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &SecretString, ttl_secs: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl_secs,
        }
    }

    /// Issue a token for `user_id` that expires after the configured TTL.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        let exp = chrono::Utc::now().timestamp().saturating_add(ttl);
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Invalid)
    }

    /// Verify a token and extract the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        let id: i64 = data.claims.sub.parse().map_err(|_| TokenError::Invalid)?;
        Ok(UserId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(ttl_secs: u64) -> TokenService {
        TokenService::new(&SecretString::from("kJ8mN2pQ7rT4vW9xA3bC6dE1fG5hL0sZ"), ttl_secs)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let tokens = service(3600);
        let token = tokens.issue(UserId::new(42)).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), UserId::new(42));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let tokens = service(3600);
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issued = service(3600).issue(UserId::new(7)).unwrap();
        let other =
            TokenService::new(&SecretString::from("zY9xW8vU7tS6rQ5pN4mL3kJ2hG1fD0cB"), 3600);
        assert_eq!(other.verify(&issued), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_reports_expiry() {
        // jsonwebtoken's default validation has 60s leeway, so back-date well
        // past it.
        let tokens = service(0);
        let claims = Claims {
            sub: "7".to_string(),
            exp: chrono::Utc::now().timestamp() - 120,
        };
        let token = encode(&Header::default(), &claims, &tokens.encoding).unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }
}
