//! Role database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for roles table
#[derive(Debug, Clone, FromRow)]
pub struct RoleModel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
