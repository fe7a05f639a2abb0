//! Validate Access Token Use Case
//!
//! Resolves an access token to the user it belongs to. Used by the guard on
//! every protected request.

use std::sync::Arc;

use serde::Serialize;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenIssuer, TokenKind};
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Authenticated caller attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub name: String,
}

/// Validate access token use case
pub struct ValidateAccessTokenUseCase<U>
where
    U: UserDirectory,
{
    user_directory: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ValidateAccessTokenUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(user_directory: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_directory,
            config,
        }
    }

    /// Missing and deactivated owners are both plain `Unauthorized`
    pub async fn execute(&self, access_token: &str) -> AuthResult<CurrentUser> {
        let user_id =
            TokenIssuer::new(self.config.clone()).verify(TokenKind::AccessToken, access_token)?;

        let user = self
            .user_directory
            .find_by_id(&user_id)
            .await?
            .filter(|user| user.can_authenticate())
            .ok_or(AuthError::Unauthorized)?;

        Ok(CurrentUser {
            user_id: user.id,
            name: user.name.as_str().to_string(),
        })
    }
}
