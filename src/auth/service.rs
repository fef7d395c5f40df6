use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::password::{hash_password, verify_password};
use super::session::{SessionTokens, TokenPair};
use super::token::TokenPayload;
use crate::config::AuthConfig;
use crate::db::models::{NewUser, PublicUser};
use crate::db::store::UserStore;
use crate::error::{AppError, AuthError, DatabaseError};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: PublicUser,
}

/// Sign-up, sign-in and refresh on top of a [`UserStore`].
pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: SessionTokens,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, sessions: SessionTokens, bcrypt_cost: u32) -> Self {
        Self {
            users,
            sessions,
            bcrypt_cost,
        }
    }

    pub fn from_config(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self::new(users, SessionTokens::from_config(config), config.bcrypt_cost)
    }

    pub fn sessions(&self) -> &SessionTokens {
        &self.sessions
    }

    /// Creates the account and returns a fresh token pair with the public
    /// user fields. An existing email fails before anything is written.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResponse> {
        if self.users.find_user_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail.into());
        }

        let new_user = NewUser {
            email: email.to_string(),
            password_hash: self.hash_password(password).await?,
        };

        let user = match self.users.create_user(&new_user).await {
            Ok(user) => user,
            // Lost a race with a concurrent sign-up for the same email.
            Err(AppError::DatabaseError(DatabaseError::Duplicate)) => {
                return Err(AuthError::DuplicateEmail.into());
            }
            Err(e) => return Err(e),
        };

        let tokens = self.sessions.issue_pair(user.id)?;
        info!(user_id = user.id, "User signed up");

        Ok(SignUpResponse {
            tokens,
            user: PublicUser::from(&user),
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenPair> {
        let user = self
            .users
            .find_user_by_email(email)
            .await?
            .ok_or(AuthError::NoSuchUser)?;

        if !verify_password(password, &user.password_hash).await? {
            warn!(user_id = user.id, "Sign-in rejected: password mismatch");
            return Err(AuthError::InvalidPassword.into());
        }

        let tokens = self.sessions.issue_pair(user.id)?;
        info!(user_id = user.id, "User signed in");
        Ok(tokens)
    }

    /// Mints a new access token for the subject of a valid refresh token,
    /// provided that user still exists.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        let payload = self.sessions.verify_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_user_by_id(payload.userid)
            .await?
            .ok_or_else(|| {
                warn!(user_id = payload.userid, "Refresh rejected: user no longer exists");
                AuthError::UserNotFound
            })?;

        let access_token = self.sessions.issue_access_token(user.id)?;
        info!(user_id = user.id, "Access token refreshed");
        Ok(access_token)
    }

    pub fn verify_access_token(&self, token: &str) -> std::result::Result<TokenPayload, AuthError> {
        self.sessions.verify_access_token(token)
    }

    pub async fn hash_password(&self, password: &str) -> Result<String> {
        hash_password(password, self.bcrypt_cost).await
    }
}
