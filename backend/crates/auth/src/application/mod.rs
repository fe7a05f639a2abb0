//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod login;
pub mod profile;
pub mod refresh_token;
pub mod sign_up;
pub mod token;
pub mod validate_access_token;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};
pub use refresh_token::RefreshTokenUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{TokenIssuer, TokenKind, TokenPair};
pub use validate_access_token::{CurrentUser, ValidateAccessTokenUseCase};
