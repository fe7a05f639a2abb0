//! Change Password Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::UserChanges;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::{
    user_id::UserId,
    user_password::{PasswordHash, RawPassword},
};
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<U>
where
    U: UserDirectory,
{
    user_directory: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(user_directory: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_directory,
            config,
        }
    }

    /// Checks run in order: same password, new-password policy, old password.
    /// Only the stored hash changes; issued tokens stay valid.
    pub async fn execute(&self, user_id: &UserId, input: ChangePasswordInput) -> AuthResult<()> {
        if input.old_password == input.new_password {
            return Err(AuthError::SamePassword);
        }

        let new_password = RawPassword::new(input.new_password, "newPassword")?;

        let user = self
            .user_directory
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let hasher = self.config.password_hasher();

        if !hasher
            .verify_blocking(input.old_password, user.password_hash.into_db())
            .await
        {
            return Err(AuthError::WrongOldPassword);
        }

        let new_hash = hasher.hash_blocking(new_password.into_inner()).await?;

        self.user_directory
            .update_by_id(user_id, &UserChanges::password_hash(PasswordHash::from_db(new_hash)))
            .await?;

        tracing::info!(user_id = %user_id, "Password changed");

        Ok(())
    }
}
