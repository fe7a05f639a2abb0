//! In-memory User Directory
//!
//! Backs tests and local runs without a database. Email uniqueness is checked
//! under the write lock, matching the database constraint.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::{User, UserChanges};
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::{email::Email, user_id::UserId, user_status::UserStatus};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change a user's status directly, as an administrator would
    pub async fn set_status(&self, user_id: &UserId, status: UserStatus) -> AuthResult<User> {
        self.update_by_id(user_id, &UserChanges::status(status)).await
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.id, user.clone());

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| &user.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn update_by_id(&self, user_id: &UserId, changes: &UserChanges) -> AuthResult<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        user.apply(changes);
        Ok(user.clone())
    }
}
