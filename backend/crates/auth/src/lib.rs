//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, the user directory trait
//! - `application/` - Use cases, token issuance, configuration
//! - `infra/` - PostgreSQL and in-memory user directories
//! - `presentation/` - HTTP handlers, DTOs, guard, router
//!
//! ## Features
//! - Signup and login with email + password
//! - Stateless JWT access and refresh tokens carried in httpOnly cookies
//! - Refresh with rotation, logout, password change
//! - Per-route public/protected guard
//! - User profile read and update
//!
//! ## Security Model
//! - Passwords hashed with PBKDF2-HMAC-SHA512 on the blocking pool
//! - Separate secrets for access and refresh tokens
//! - Unknown email and wrong password are indistinguishable, in body and in KDF work

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod messages;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::validate_access_token::CurrentUser;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserDirectory, PgUserDirectory};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
