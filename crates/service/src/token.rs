use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("claims must be a JSON object")]
    InvalidClaims,
    #[error("token rejected")]
    Invalid,
    #[error("token encoding failed: {0}")]
    Encode(String),
}

/// Claims this service reads back out of a verified token. The issued token
/// carries whatever object the client logged in with; only `email` takes
/// part in authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    pub exp: i64,
}

/// Issues and verifies the HS256 session tokens carried in the auth cookie.
#[derive(Clone)]
pub struct TokenCodec {
    secret: String,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into(), ttl: Duration::hours(1) }
    }

    /// Override the session lifetime; mainly useful in tests.
    pub fn with_ttl(secret: impl Into<String>, ttl: Duration) -> Self {
        Self { secret: secret.into(), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign the caller-supplied claims object, stamping `iat` and `exp`.
    /// Non-object values are rejected since there is nowhere to put the
    /// expiry.
    pub fn issue(&self, claims: &Value) -> Result<String, TokenError> {
        let Some(claims) = claims.as_object() else {
            return Err(TokenError::InvalidClaims);
        };
        let now = Utc::now();
        let mut payload: Map<String, Value> = claims.clone();
        payload.insert("iat".into(), Value::from(now.timestamp()));
        payload.insert("exp".into(), Value::from((now + self.ttl).timestamp()));
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Verify signature and expiry. Expiry is checked without leeway so a
    /// token is rejected the moment `exp` passes. Registered claims other
    /// than `exp` are carried as plain data, not enforced. All failure modes
    /// collapse into `TokenError::Invalid`; callers treat any bad token the
    /// same way.
    pub fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Login bodies are arbitrary objects; an `aud` member in them is
        // data, not an audience restriction to check against.
        validation.validate_aud = false;
        decode::<AuthClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
    }
}
