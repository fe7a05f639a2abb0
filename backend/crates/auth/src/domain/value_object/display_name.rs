//! Display Name Value Object

use kernel::error::app_error::AppResult;
use serde::{Deserialize, Serialize};

use super::{MAX_TEXT_LENGTH, field_error, max_length_error};
use crate::messages;

const FIELD: &str = "name";

/// User-chosen display name, trimmed, 1 to 250 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();
        let name = name.trim();

        if name.is_empty() {
            return Err(field_error(messages::NOT_EMPTY, FIELD));
        }
        if name.chars().count() > MAX_TEXT_LENGTH {
            return Err(max_length_error(FIELD, MAX_TEXT_LENGTH));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
