//! User entity - a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::{RecordId, UserStatus};

/// User account. The password hash lives only in storage and is never part of
/// this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account may authenticate
    #[inline]
    pub fn can_login(&self) -> bool {
        self.status.is_active()
    }

    /// Update the username
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Update the email
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: UserStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Fields needed to insert a user; storage assigns the id and timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub status: UserStatus,
}

impl NewUser {
    /// Registration always creates active accounts
    pub fn active(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            status: UserStatus::Active,
        }
    }
}
