//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use userhub_core::entities::{NewProfile, Profile};
use userhub_core::error::DomainError;
use userhub_core::traits::{ProfileRepository, RepoResult};
use userhub_core::value_objects::RecordId;

use crate::models::ProfileModel;

use super::error::{map_db_error, map_unique_violation, profile_not_found};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, user_id, nickname, avatar, bio, phone, gender, birthday,
                   created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Profile::try_from).transpose()
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn create(&self, profile: &NewProfile) -> RepoResult<Profile> {
        let model = sqlx::query_as::<_, ProfileModel>(
            r"
            INSERT INTO profiles (user_id, nickname, avatar, bio, phone, gender, birthday)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, nickname, avatar, bio, phone, gender, birthday,
                      created_at, updated_at
            ",
        )
        .bind(profile.user_id.into_inner())
        .bind(&profile.nickname)
        .bind(&profile.avatar)
        .bind(&profile.bio)
        .bind(&profile.phone)
        .bind(profile.gender.code())
        .bind(&profile.birthday)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::ProfileAlreadyExists))?;

        Profile::try_from(model)
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn update(&self, profile: &Profile) -> RepoResult<Profile> {
        let model = sqlx::query_as::<_, ProfileModel>(
            r"
            UPDATE profiles
            SET nickname = $2, avatar = $3, bio = $4, phone = $5, gender = $6,
                birthday = $7, updated_at = NOW()
            WHERE user_id = $1
            RETURNING id, user_id, nickname, avatar, bio, phone, gender, birthday,
                      created_at, updated_at
            ",
        )
        .bind(profile.user_id.into_inner())
        .bind(&profile.nickname)
        .bind(&profile.avatar)
        .bind(&profile.bio)
        .bind(&profile.phone)
        .bind(profile.gender.code())
        .bind(&profile.birthday)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model
            .ok_or_else(|| profile_not_found(profile.user_id))
            .and_then(Profile::try_from)
    }
}
