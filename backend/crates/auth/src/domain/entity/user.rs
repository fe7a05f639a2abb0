//! User Entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::PasswordHash,
    user_status::UserStatus,
};

/// User entity
///
/// Holds the password hash, so it never crosses the HTTP boundary; responses
/// use [`UserInfo`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Unique, normalized
    pub email: Email,
    pub password_hash: PasswordHash,
    pub name: DisplayName,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(email: Email, password_hash: PasswordHash, name: DisplayName) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            email,
            password_hash,
            name,
            status: UserStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn can_authenticate(&self) -> bool {
        self.status.can_authenticate()
    }

    /// Public projection
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email.as_str().to_string(),
            name: self.name.as_str().to_string(),
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            self.password_hash = password_hash.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// The only user shape returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// Partial update for [`UserDirectory::update_by_id`](crate::domain::repository::UserDirectory::update_by_id)
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<DisplayName>,
    pub password_hash: Option<PasswordHash>,
    pub status: Option<UserStatus>,
}

impl UserChanges {
    pub fn name(name: DisplayName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    pub fn password_hash(password_hash: PasswordHash) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Default::default()
        }
    }

    pub fn status(status: UserStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
