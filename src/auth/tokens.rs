//! Token service: issuing and verifying signed identity tokens

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::models::{Claims, User};
use crate::common::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("JWT_SECRET is not configured")]
    MissingSecret,

    #[error("Failed to sign token")]
    Signing,
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired | TokenError::Invalid => ApiError::Unauthorized(e.to_string()),
            TokenError::MissingSecret => ApiError::Config(e.to_string()),
            TokenError::Signing => ApiError::InternalServer(e.to_string()),
        }
    }
}

/// Issue a signed token for a user, valid for `ttl_hours` from now
pub fn issue(user: &User, secret: &str, ttl_hours: i64) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.effective_role().as_str().to_string(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Signing)
}

/// Verify a token and return its claims, distinguishing an expired token
/// from a malformed or forged one
pub fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(TokenError::Expired),
            _ => Err(TokenError::Invalid),
        },
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
/// Returns None unless the value is exactly two space-separated parts with a
/// literal `Bearer` scheme.
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    let parts: Vec<&str> = header_value.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return None;
    }
    Some(parts[1])
}
