//! PostgreSQL implementation of ConfigRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use userhub_core::entities::{ConfigEntry, ConfigFilter, NewConfigEntry};
use userhub_core::error::DomainError;
use userhub_core::traits::{ConfigRepository, RepoResult};

use crate::models::ConfigEntryModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgConfigRepository {
    pool: PgPool,
}

impl PgConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so a prefix matches literally
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ConfigRepository for PgConfigRepository {
    #[instrument(skip(self))]
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<ConfigEntry>> {
        let result = sqlx::query_as::<_, ConfigEntryModel>(
            r"
            SELECT id, key, value, created_at, updated_at
            FROM configs
            WHERE key = $1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ConfigEntry::from))
    }

    #[instrument(skip(self, entry), fields(key = %entry.key))]
    async fn create(&self, entry: &NewConfigEntry) -> RepoResult<ConfigEntry> {
        let model = sqlx::query_as::<_, ConfigEntryModel>(
            r"
            INSERT INTO configs (key, value)
            VALUES ($1, $2)
            RETURNING id, key, value, created_at, updated_at
            ",
        )
        .bind(&entry.key)
        .bind(&entry.value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::ConfigKeyAlreadyExists))?;

        Ok(ConfigEntry::from(model))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &ConfigFilter) -> RepoResult<Vec<ConfigEntry>> {
        let pattern = filter.key_prefix.as_deref().map(like_prefix);

        let results = sqlx::query_as::<_, ConfigEntryModel>(
            r"
            SELECT id, key, value, created_at, updated_at
            FROM configs
            WHERE $1::TEXT IS NULL OR key LIKE $1
            ORDER BY key
            ",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ConfigEntry::from).collect())
    }
}
