//! Config entry - a row of the key-value configuration store

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub id: RecordId,
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConfigEntry {
    pub key: String,
    pub value: String,
}

/// Filter for listing config entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFilter {
    /// Only keys starting with this prefix
    pub key_prefix: Option<String>,
}

impl ConfigFilter {
    pub fn matches(&self, key: &str) -> bool {
        self.key_prefix
            .as_deref()
            .map_or(true, |prefix| key.starts_with(prefix))
    }
}
