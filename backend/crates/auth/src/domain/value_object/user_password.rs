//! User Password Value Objects
//!
//! `RawPassword` is user input that passed the password policy.
//! `PasswordHash` is the opaque `<keyHex>.<saltHex>` string produced by
//! `platform::password`.

use kernel::error::app_error::{AppError, AppResult};
use kernel::i18n::Message;
use std::fmt;

use super::{MAX_TEXT_LENGTH, field_error, max_length_error};
use crate::messages;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Special characters that satisfy the policy
pub const SPECIAL_CHARACTERS: &str = "@$#!%*?&_";

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password from user input that satisfies the policy
///
/// ## Policy
/// - 8 to 250 characters
/// - at least one lowercase letter, one uppercase letter and one digit
/// - at least one of `@$#!%*?&_`
/// - the first character is a letter, a digit or one of those specials
pub struct RawPassword(String);

impl RawPassword {
    /// Validate `raw`, naming `field` in any error
    pub fn new(raw: impl Into<String>, field: &'static str) -> AppResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(field_error(messages::NOT_EMPTY, field));
        }

        let length = raw.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(
                Message::new(messages::MIN_LENGTH)
                    .with_arg("key", field)
                    .with_arg("length", MIN_PASSWORD_LENGTH),
            ));
        }
        if length > MAX_TEXT_LENGTH {
            return Err(max_length_error(field, MAX_TEXT_LENGTH));
        }

        if !Self::meets_composition(&raw) {
            return Err(field_error(messages::INVALID_PASSWORD, field));
        }

        Ok(Self(raw))
    }

    fn meets_composition(raw: &str) -> bool {
        let is_special = |c: char| SPECIAL_CHARACTERS.contains(c);

        let starts_well = raw
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || is_special(c));

        starts_well
            && raw.chars().any(|c| c.is_ascii_lowercase())
            && raw.chars().any(|c| c.is_ascii_uppercase())
            && raw.chars().any(|c| c.is_ascii_digit())
            && raw.chars().any(is_special)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Hash (for storage)
// ============================================================================

/// Stored password hash; never leaves the service
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordHash").field(&"[HASH]").finish()
    }
}
