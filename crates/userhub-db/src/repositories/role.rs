//! PostgreSQL implementation of RoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use userhub_core::entities::{NewRole, Role, User};
use userhub_core::error::DomainError;
use userhub_core::traits::{RepoResult, RoleRepository};
use userhub_core::value_objects::RecordId;

use crate::models::{RoleModel, UserModel};

use super::error::{map_db_error, map_unique_violation, role_not_found};

/// PostgreSQL implementation of RoleRepository
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new PgRoleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            r"
            SELECT id, name, description, created_at, updated_at
            FROM roles
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            r"
            SELECT id, name, description, created_at, updated_at
            FROM roles
            WHERE name = $1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Role>> {
        let results = sqlx::query_as::<_, RoleModel>(
            r"
            SELECT id, name, description, created_at, updated_at
            FROM roles
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Role::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, role: &NewRole) -> RepoResult<Role> {
        let model = sqlx::query_as::<_, RoleModel>(
            r"
            INSERT INTO roles (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            ",
        )
        .bind(&role.name)
        .bind(&role.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::RoleNameAlreadyExists))?;

        Ok(Role::from(model))
    }

    #[instrument(skip(self), fields(role_id = %role.id))]
    async fn update(&self, role: &Role) -> RepoResult<Role> {
        let model = sqlx::query_as::<_, RoleModel>(
            r"
            UPDATE roles
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            ",
        )
        .bind(role.id.into_inner())
        .bind(&role.name)
        .bind(&role.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::RoleNameAlreadyExists))?;

        model.map(Role::from).ok_or_else(|| role_not_found(role.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(role_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Role>> {
        let results = sqlx::query_as::<_, RoleModel>(
            r"
            SELECT r.id, r.name, r.description, r.created_at, r.updated_at
            FROM roles r
            INNER JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Role::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_users(&self, role_id: RecordId) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.username, u.email, u.status, u.created_at, u.updated_at
            FROM users u
            INNER JOIN user_roles ur ON ur.user_id = u.id
            WHERE ur.role_id = $1
            ORDER BY u.id
            ",
        )
        .bind(role_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn add_to_user(&self, user_id: RecordId, role_id: RecordId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, role_id) DO NOTHING
            ",
        )
        .bind(user_id.into_inner())
        .bind(role_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove_from_user(&self, user_id: RecordId, role_id: RecordId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM user_roles
            WHERE user_id = $1 AND role_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(role_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
