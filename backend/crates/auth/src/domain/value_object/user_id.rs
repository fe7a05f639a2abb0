//! User identifier
//!
//! The typed id lives in the kernel so other crates can name users without
//! depending on auth.

pub use kernel::id::UserId;
