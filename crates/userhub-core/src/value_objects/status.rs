//! Small integer-coded enums persisted as SMALLINT columns

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Account status. Only `Active` accounts may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Inactive = 0,
    #[default]
    Active = 1,
    Locked = 2,
}

impl UserStatus {
    /// Numeric code stored in the database
    #[inline]
    pub const fn code(self) -> i16 {
        self as i16
    }

    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Locked => "locked",
        }
    }
}

impl TryFrom<i16> for UserStatus {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            2 => Ok(Self::Locked),
            other => Err(DomainError::InvalidUserStatus(other)),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender recorded on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Unknown = 0,
    Male = 1,
    Female = 2,
}

impl Gender {
    #[inline]
    pub const fn code(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for Gender {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            other => Err(DomainError::InvalidGender(other)),
        }
    }
}
