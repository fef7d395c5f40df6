use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::token::{self, TokenKind, TokenPayload};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::Result;

/// Secret and lifetime for one kind of token.
#[derive(Clone)]
struct TokenPolicy {
    kind: TokenKind,
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenPolicy {
    fn issue(&self, user_id: i32, now: DateTime<Utc>) -> Result<String> {
        token::issue(self.kind, TokenPayload::new(user_id), &self.secret, self.ttl, now)
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> std::result::Result<TokenPayload, AuthError> {
        token::verify(token, &self.secret, now).map_err(|e| {
            warn!(kind = self.kind.as_str(), reason = %e, "Token rejected");
            e
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mints and checks the two token kinds. Access tokens are short lived and
/// signed with the access secret; refresh tokens live longer and use a
/// separate secret, so neither kind verifies as the other.
#[derive(Clone)]
pub struct SessionTokens {
    access: TokenPolicy,
    refresh: TokenPolicy,
}

impl SessionTokens {
    pub fn new(
        access_secret: impl Into<Vec<u8>>,
        refresh_secret: impl Into<Vec<u8>>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: TokenPolicy {
                kind: TokenKind::Access,
                secret: access_secret.into(),
                ttl: access_ttl,
            },
            refresh: TokenPolicy {
                kind: TokenKind::Refresh,
                secret: refresh_secret.into(),
                ttl: refresh_ttl,
            },
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.access_token_secret.as_bytes(),
            config.refresh_token_secret.as_bytes(),
            Duration::minutes(config.access_token_ttl_minutes),
            Duration::days(config.refresh_token_ttl_days),
        )
    }

    pub fn access_ttl(&self) -> Duration {
        self.access.ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh.ttl
    }

    pub fn issue_access_token(&self, user_id: i32) -> Result<String> {
        self.access.issue(user_id, Utc::now())
    }

    pub fn issue_refresh_token(&self, user_id: i32) -> Result<String> {
        self.refresh.issue(user_id, Utc::now())
    }

    pub fn issue_pair(&self, user_id: i32) -> Result<TokenPair> {
        let now = Utc::now();
        Ok(TokenPair {
            access_token: self.access.issue(user_id, now)?,
            refresh_token: self.refresh.issue(user_id, now)?,
        })
    }

    pub fn verify_access_token(&self, token: &str) -> std::result::Result<TokenPayload, AuthError> {
        self.verify_access_token_at(token, Utc::now())
    }

    pub fn verify_access_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<TokenPayload, AuthError> {
        self.access.verify(token, now)
    }

    pub fn verify_refresh_token(&self, token: &str) -> std::result::Result<TokenPayload, AuthError> {
        self.verify_refresh_token_at(token, Utc::now())
    }

    pub fn verify_refresh_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<TokenPayload, AuthError> {
        self.refresh.verify(token, now)
    }
}
