//! Role entity and user-role association

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Name of the role every new account receives
pub const DEFAULT_ROLE_NAME: &str = "user";

/// Name of the seeded administrator role
pub const ADMIN_ROLE_NAME: &str = "admin";

/// Named role. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    #[inline]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_ROLE_NAME
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    pub description: String,
}

/// A (user, role) pair. Each pair exists at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserRole {
    pub user_id: RecordId,
    pub role_id: RecordId,
    pub created_at: DateTime<Utc>,
}
