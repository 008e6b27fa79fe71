use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::MAX_JWT_EXPIRY_HOURS;

pub mod password;

pub use password::{check_password, hash_password, PasswordError};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Employee business identifier (`emp_id`)
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Token lifetime of {0} hours is out of range")]
    InvalidTtl(u64),

    /// Bad signature, expired, or malformed. Deliberately carries no detail.
    #[error("Invalid token")]
    Invalid,
}

/// Issues and verifies signed bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        // Capped so `now + ttl` can never overflow when a token is issued
        let ttl = Some(ttl_hours)
            .filter(|hours| (1..=MAX_JWT_EXPIRY_HOURS).contains(hours))
            .and_then(|hours| i64::try_from(hours).ok())
            .and_then(Duration::try_hours)
            .ok_or(JwtError::InvalidTtl(ttl_hours))?;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::new(subject, ttl);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Returns the token subject when signature and expiry both check out.
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            JwtError::Invalid
        })?;

        if token_data.claims.sub.is_empty() {
            return Err(JwtError::Invalid);
        }
        Ok(token_data.claims.sub)
    }
}
