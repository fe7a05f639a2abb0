//! User Profile Use Cases

use std::sync::Arc;

use crate::domain::entity::user::{UserChanges, UserInfo};
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::{display_name::DisplayName, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Get profile use case
pub struct GetProfileUseCase<U>
where
    U: UserDirectory,
{
    user_directory: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(user_directory: Arc<U>) -> Self {
        Self { user_directory }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<UserInfo> {
        self.user_directory
            .find_by_id(user_id)
            .await?
            .map(|user| user.info())
            .ok_or(AuthError::UserNotFound)
    }
}

/// Update profile input
pub struct UpdateProfileInput {
    pub name: String,
}

/// Update profile use case (display name only)
pub struct UpdateProfileUseCase<U>
where
    U: UserDirectory,
{
    user_directory: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(user_directory: Arc<U>) -> Self {
        Self { user_directory }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AuthResult<UserInfo> {
        let name = DisplayName::new(input.name)?;

        let user = self
            .user_directory
            .update_by_id(user_id, &UserChanges::name(name))
            .await?;

        tracing::info!(user_id = %user_id, "Profile updated");

        Ok(user.info())
    }
}
