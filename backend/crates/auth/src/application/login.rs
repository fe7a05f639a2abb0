//! Login Use Case
//!
//! Authenticates by email and password. Unknown email and wrong password
//! fail identically, and both paths run the KDF once.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenIssuer, TokenPair};
use crate::domain::entity::user::{User, UserInfo};
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Well-formed hash that no password is expected to match
///
/// Verified against when there is no user, so a miss costs the same KDF work
/// as a wrong password.
const TIMING_DECOY_HASH: &str = "fc0f84ce235782c10fc31f2a463992c53eeb39faf132322a1edf622f0c6dca31\
a2313b91c935486c3ef781ba183c1b86fcfc6d38c8eee82d0c9dd55da3982d27\
.6ab293149e093233ab2e2d8a5c10904f";

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user_info: UserInfo,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserDirectory,
{
    user_directory: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(user_directory: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_directory,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self.lookup(input.email).await?;

        let stored = user
            .as_ref()
            .map_or(TIMING_DECOY_HASH, |u| u.password_hash.as_str())
            .to_string();

        let password_valid = self
            .config
            .password_hasher()
            .verify_blocking(input.password, stored)
            .await;

        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        // Only reported to callers who proved the password
        if !user.can_authenticate() {
            return Err(AuthError::AccountNotActive);
        }

        let tokens = TokenIssuer::new(self.config.clone()).issue_pair(&user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput {
            user_info: user.info(),
            tokens,
        })
    }

    /// A malformed email is treated as an unknown one
    async fn lookup(&self, email: String) -> AuthResult<Option<User>> {
        match Email::new(email) {
            Ok(email) => self.user_directory.find_by_email(&email).await,
            Err(_) => Ok(None),
        }
    }
}
