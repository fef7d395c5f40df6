//! Token codec: HS256-signed, time-limited tokens carrying a [`TokenPayload`].
//!
//! Both functions take the secret and the clock as arguments; nothing here
//! reads configuration or the system time on its own.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AuthError};

/// Which policy a token was minted under. The kind is not written into the
/// token; it only selects the secret and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity a token is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub userid: i32,
}

impl TokenPayload {
    pub fn new(userid: i32) -> Self {
        Self { userid }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub payload: TokenPayload,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration time
}

/// Signs `payload` with `secret`, valid from `now` until `now + ttl`.
pub fn issue(
    kind: TokenKind,
    payload: TokenPayload,
    secret: &[u8],
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let expires = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::InternalError(format!("{} token lifetime is out of range", kind)))?;
    let claims = Claims {
        payload,
        iat: now.timestamp(),
        exp: expires.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::InternalError(format!("Failed to encode {} token: {}", kind, e)))?;

    debug!(kind = kind.as_str(), userid = payload.userid, exp = claims.exp, "Issued token");
    Ok(token)
}

/// Checks the signature against `secret`, then that `now` lies within the
/// token's `[iat, exp]` window.
pub fn verify(token: &str, secret: &[u8], now: DateTime<Utc>) -> Result<TokenPayload, AuthError> {
    decode_claims(token, secret, now).map(|claims| claims.payload)
}

pub fn decode_claims(token: &str, secret: &[u8], now: DateTime<Utc>) -> Result<Claims, AuthError> {
    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation())
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Malformed,
        })?
        .claims;

    let now = now.timestamp();
    if now > claims.exp {
        return Err(AuthError::Expired);
    }
    if claims.iat > now || claims.iat > claims.exp {
        return Err(AuthError::Malformed);
    }

    Ok(claims)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked against the caller-supplied clock in `decode_claims`.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);
    validation
}
