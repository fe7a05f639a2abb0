//! User Status Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserStatus {
    /// Can log in and hold tokens
    #[default]
    Active = 0,

    /// Deactivated; existing tokens stop working on next use
    Deactive = 1,
}

impl UserStatus {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deactive => "deactive",
        }
    }

    /// Check if login, refresh and protected access are allowed
    #[inline]
    pub const fn can_authenticate(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Active),
            1 => Some(Self::Deactive),
            _ => None,
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "deactive" => Some(Self::Deactive),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
