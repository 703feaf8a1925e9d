//! Profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub avatar: String,
    pub bio: String,
    pub phone: String,
    pub gender: i16,
    pub birthday: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
