//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::user::{User, UserChanges};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// User directory
///
/// Email uniqueness is enforced by the store itself; a duplicate insert
/// surfaces as `AuthError::EmailTaken` even when an earlier lookup missed.
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Insert a new user
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Apply a partial update; unknown ids yield `AuthError::UserNotFound`
    async fn update_by_id(&self, user_id: &UserId, changes: &UserChanges) -> AuthResult<User>;
}
