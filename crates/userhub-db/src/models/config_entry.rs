use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for configs table
#[derive(Debug, Clone, FromRow)]
pub struct ConfigEntryModel {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
