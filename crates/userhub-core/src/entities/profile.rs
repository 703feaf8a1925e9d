//! Profile entity - one-to-one extension of a user

use chrono::{DateTime, Utc};

use crate::value_objects::{Gender, RecordId};

/// Optional personal details attached to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: RecordId,
    pub user_id: RecordId,
    pub nickname: String,
    pub avatar: String,
    pub bio: String,
    pub phone: String,
    pub gender: Gender,
    /// Free-text date as entered by the user
    pub birthday: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProfile {
    pub user_id: RecordId,
    pub nickname: String,
    pub avatar: String,
    pub bio: String,
    pub phone: String,
    pub gender: Gender,
    pub birthday: String,
}

impl NewProfile {
    /// Default profile for a user: nickname is the username, all else empty
    pub fn default_for(user_id: RecordId, username: &str) -> Self {
        Self {
            user_id,
            nickname: username.to_string(),
            ..Default::default()
        }
    }
}
