//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the auth crate and the api binary:
//! - Password hashing (PBKDF2-HMAC-SHA512)
//! - Signed token codec (JWT)
//! - Cookie rendering and parsing
//! - Client identification for request spans
//! - Duration parsing for configuration
//! - Fixed-window rate limiting

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod duration;
pub mod password;
pub mod rate_limit;
pub mod token;
