//! Sign Up Use Case
//!
//! Creates a new user account and signs them in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenIssuer, TokenPair};
use crate::domain::entity::user::{User, UserInfo};
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{PasswordHash, RawPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_info: UserInfo,
    pub tokens: TokenPair,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserDirectory,
{
    user_directory: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(user_directory: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_directory,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(input.email)?;
        let name = DisplayName::new(input.name)?;
        let raw_password = RawPassword::new(input.password, "password")?;

        // Fast path; the unique constraint still decides under a race
        if self
            .user_directory
            .find_by_email(&email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self
            .config
            .password_hasher()
            .hash_blocking(raw_password.into_inner())
            .await?;

        let user = User::new(email, PasswordHash::from_db(password_hash), name);
        self.user_directory.create_user(&user).await?;

        let tokens = TokenIssuer::new(self.config.clone()).issue_pair(&user.id)?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(SignUpOutput {
            user_info: user.info(),
            tokens,
        })
    }
}
