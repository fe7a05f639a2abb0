//! Refresh Token Use Case
//!
//! Exchanges a valid refresh token for a new access and refresh pair.
//! Tokens are stateless, so the presented refresh token stays valid until it
//! expires.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenIssuer, TokenKind, TokenPair};
use crate::domain::repository::UserDirectory;
use crate::error::{AuthError, AuthResult};

/// Refresh token use case
pub struct RefreshTokenUseCase<U>
where
    U: UserDirectory,
{
    user_directory: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RefreshTokenUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(user_directory: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_directory,
            config,
        }
    }

    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<TokenPair> {
        let refresh_token = refresh_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::Unauthorized)?;

        let issuer = TokenIssuer::new(self.config.clone());
        let user_id = issuer.verify(TokenKind::RefreshToken, refresh_token)?;

        let user = self
            .user_directory
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !user.can_authenticate() {
            return Err(AuthError::TokenOwnerInactive);
        }

        let tokens = issuer.issue_pair(&user.id)?;

        tracing::debug!(user_id = %user.id, "Tokens refreshed");

        Ok(tokens)
    }
}
