//! API DTOs (Data Transfer Objects)
//!
//! Request fields default to empty so a missing field reports the same
//! validation error as a blank one.

use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::UserInfo;
use crate::error::AuthError;

/// JSON body whose parse failures render as `error.VALIDATION.INVALID_BODY`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct JsonBody<T>(pub T);

// ============================================================================
// Auth
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Change password request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Sign up and login response; tokens travel only in cookies
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_info: UserInfoResponse,
}

// ============================================================================
// User
// ============================================================================

/// Update profile request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// Public user shape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<UserInfo> for UserInfoResponse {
    fn from(info: UserInfo) -> Self {
        Self {
            id: info.id.to_string(),
            email: info.email,
            name: info.name,
        }
    }
}
