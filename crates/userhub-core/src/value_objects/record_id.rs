//! Record identifiers - storage-assigned numeric keys
//!
//! Every persisted row (user, profile, role, config entry) is addressed by a
//! positive 64-bit integer handed out by the store on insert. Ids are never
//! reused and never change after creation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned numeric identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Create a new RecordId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Ids handed out by storage start at 1
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, RecordIdParseError> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| RecordIdParseError::InvalidFormat)?;
        if id <= 0 {
            return Err(RecordIdParseError::OutOfRange);
        }
        Ok(Self(id))
    }
}

/// Error when parsing a RecordId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdParseError {
    #[error("invalid id format")]
    InvalidFormat,

    #[error("id must be a positive integer")]
    OutOfRange,
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}
