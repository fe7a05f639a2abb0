//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::i18n::Message;
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::messages;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email or wrong password; the two are never told apart
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Correct credentials on a deactivated account
    #[error("Account is not active")]
    AccountNotActive,

    /// Valid refresh token whose owner has been deactivated
    #[error("Token owner is not active")]
    TokenOwnerInactive,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Token has expired")]
    TokenExpired,

    #[error("New password equals the old password")]
    SamePassword,

    #[error("Old password does not match")]
    WrongOldPassword,

    #[error("User not found")]
    UserNotFound,

    /// Caller spent its request budget for the current window
    #[error("Too many requests, retry in {retry_after_secs}s")]
    TooManyRequests { retry_after_secs: u64 },

    /// Input failed validation; the message names the field
    #[error("Validation failed: {0}")]
    Validation(Message),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken | AuthError::WrongOldPassword => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::SamePassword
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::AccountNotActive => ErrorKind::UnprocessableEntity,
            AuthError::TokenOwnerInactive | AuthError::Unauthorized | AuthError::TokenExpired => {
                ErrorKind::Unauthorized
            }
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::TooManyRequests { .. } => ErrorKind::TooManyRequests,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Client-facing message; server errors never carry details
    pub fn message(&self) -> Message {
        match self {
            AuthError::EmailTaken => messages::USER_EXISTS_WITH_SAME_EMAIL.into(),
            AuthError::InvalidCredentials => messages::INVALID_CREDENTIALS.into(),
            AuthError::AccountNotActive | AuthError::TokenOwnerInactive => {
                messages::ACCOUNT_NOT_ACTIVE.into()
            }
            AuthError::Unauthorized => messages::UNAUTHORIZED.into(),
            AuthError::TokenExpired => messages::TOKEN_EXPIRED.into(),
            AuthError::SamePassword => messages::SAME_PASSWORD.into(),
            AuthError::WrongOldPassword => messages::INVALID_OLD_PASSWORD.into(),
            AuthError::UserNotFound => messages::USER_NOT_FOUND.into(),
            AuthError::TooManyRequests { .. } => messages::TOO_MANY_REQUESTS.into(),
            AuthError::Validation(message) => message.clone(),
            AuthError::Database(_) | AuthError::Internal(_) => messages::INTERNAL_SERVER.into(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::WrongOldPassword => {
                tracing::warn!("Password change with wrong old password");
            }
            AuthError::AccountNotActive | AuthError::TokenOwnerInactive => {
                tracing::warn!(error = %self, "Inactive account rejected");
            }
            AuthError::TooManyRequests { .. } => {
                tracing::warn!(error = %self, "Request throttled");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let mut response = self.to_app_error().into_response();
        if let AuthError::TooManyRequests { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}

/// Value objects report validation failures as 400 `AppError`s
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.into_message()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        AuthError::Validation(messages::INVALID_BODY.into())
    }
}
