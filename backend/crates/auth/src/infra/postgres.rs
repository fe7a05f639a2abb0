//! PostgreSQL User Directory

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{User, UserChanges};
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::PasswordHash,
    user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = "id, email, password_hash, name, status, created_at, updated_at";

/// PostgreSQL-backed user directory
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserDirectory for PgUserDirectory {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                password_hash,
                name,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.name.as_str())
        .bind(user.status.id())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn update_by_id(&self, user_id: &UserId, changes: &UserChanges) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                password_hash = COALESCE($3, password_hash),
                status = COALESCE($4, status),
                updated_at = $5
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(changes.name.as_ref().map(DisplayName::as_str))
        .bind(changes.password_hash.as_ref().map(PasswordHash::as_str))
        .bind(changes.status.map(|status| status.id()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let status = UserStatus::from_id(self.status)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user status: {}", self.status)))?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            password_hash: PasswordHash::from_db(self.password_hash),
            name: DisplayName::from_db(self.name),
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
