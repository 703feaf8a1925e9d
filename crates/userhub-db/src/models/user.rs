//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table. `password_hash` is never
/// selected into this struct.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
