pub mod ownership;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::SecurityConfig;

pub use ownership::{authorize, Access};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub authorized: bool,
    /// Subject user id. Kept loose so a missing or non-integer claim is reported
    /// by `subject()` instead of failing the whole decode.
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                JwtError::TokenGeneration(format!("expiry of {} hours is out of range", expiry_hours))
            })?;

        Ok(Self {
            authorized: true,
            user_id: Some(Value::from(user_id)),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Caller identity carried by an already verified claim set
    pub fn subject(&self) -> Result<i64, IdentityError> {
        let value = self.user_id.as_ref().ok_or(IdentityError::MissingSubject)?;
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .ok_or(IdentityError::MalformedSubject),
            _ => Err(IdentityError::MalformedSubject),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("token carries no userId claim")]
    MissingSubject,
    #[error("token userId claim is not an integer")]
    MalformedSubject,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Issue a signed token for `user_id`
pub fn generate_jwt(user_id: i64, security: &SecurityConfig) -> Result<String, JwtError> {
    let secret = &security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let claims = Claims::new(user_id, security.jwt_expiry_hours)?;
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the claim set
pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, JwtError> {
    let secret = &security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
