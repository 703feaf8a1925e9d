//! Role service
//!
//! Handles role management and role assignment to users.

use tracing::{debug, info, instrument};
use userhub_core::entities::{NewRole, Role};
use userhub_core::RecordId;

use crate::dto::{CreateRoleRequest, RoleResponse, UpdateRoleRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::user::UserService;

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load_role(&self, role_id: RecordId) -> ServiceResult<Role> {
        self.ctx
            .role_repo()
            .find_by_id(role_id)
            .await
            .map_err(ServiceError::store("find role"))?
            .ok_or_else(|| ServiceError::not_found("Role", role_id.to_string()))
    }

    /// All roles ordered by id
    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> ServiceResult<Vec<RoleResponse>> {
        let roles = self
            .ctx
            .role_repo()
            .list()
            .await
            .map_err(ServiceError::store("list roles"))?;
        Ok(roles.iter().map(RoleResponse::from).collect())
    }

    /// Get a role by ID
    #[instrument(skip(self))]
    pub async fn get_role(&self, role_id: RecordId) -> ServiceResult<RoleResponse> {
        let role = self.load_role(role_id).await?;
        Ok(RoleResponse::from(&role))
    }

    /// Create a new role
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_role(&self, request: CreateRoleRequest) -> ServiceResult<RoleResponse> {
        let roles = self.ctx.role_repo();

        if roles
            .find_by_name(&request.name)
            .await
            .map_err(ServiceError::store("check role name"))?
            .is_some()
        {
            return Err(ServiceError::already_exists("Role name already taken"));
        }

        let role = roles
            .create(&NewRole {
                name: request.name,
                description: request.description,
            })
            .await
            .map_err(ServiceError::store("create role"))?;

        info!(role_id = %role.id, name = %role.name, "Role created");

        Ok(RoleResponse::from(&role))
    }

    /// Rename or re-describe a role
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn update_role(
        &self,
        role_id: RecordId,
        request: UpdateRoleRequest,
    ) -> ServiceResult<RoleResponse> {
        let mut role = self.load_role(role_id).await?;
        let roles = self.ctx.role_repo();

        if request.name != role.name {
            let taken = roles
                .find_by_name(&request.name)
                .await
                .map_err(ServiceError::store("check role name"))?
                .is_some_and(|other| other.id != role.id);
            if taken {
                return Err(ServiceError::already_exists("Role name already taken"));
            }
        }

        role.name = request.name;
        role.description = request.description;

        let updated = roles
            .update(&role)
            .await
            .map_err(ServiceError::store("update role"))?;

        info!(role_id = %updated.id, "Role updated");

        Ok(RoleResponse::from(&updated))
    }

    /// Delete a role and every assignment of it
    #[instrument(skip(self))]
    pub async fn delete_role(&self, role_id: RecordId) -> ServiceResult<()> {
        let role = self.load_role(role_id).await?;

        self.ctx
            .role_repo()
            .delete(role.id)
            .await
            .map_err(ServiceError::store("delete role"))?;

        info!(role_id = %role.id, name = %role.name, "Role deleted");
        Ok(())
    }

    /// Give a role to a user. Assigning a role the user already holds is a
    /// no-op.
    #[instrument(skip(self))]
    pub async fn assign_role(&self, user_id: RecordId, role_id: RecordId) -> ServiceResult<()> {
        let user = UserService::new(self.ctx).load_user(user_id).await?;
        let role = self.load_role(role_id).await?;

        let added = self
            .ctx
            .role_repo()
            .add_to_user(user.id, role.id)
            .await
            .map_err(ServiceError::store("assign role"))?;

        if added {
            info!(user_id = %user.id, role_id = %role.id, "Role assigned");
        } else {
            debug!(user_id = %user.id, role_id = %role.id, "Role already assigned");
        }
        Ok(())
    }

    /// Take a role away from a user. Revoking a role the user does not hold
    /// is a no-op.
    #[instrument(skip(self))]
    pub async fn revoke_role(&self, user_id: RecordId, role_id: RecordId) -> ServiceResult<()> {
        let user = UserService::new(self.ctx).load_user(user_id).await?;
        let role = self.load_role(role_id).await?;

        let removed = self
            .ctx
            .role_repo()
            .remove_from_user(user.id, role.id)
            .await
            .map_err(ServiceError::store("revoke role"))?;

        if removed {
            info!(user_id = %user.id, role_id = %role.id, "Role revoked");
        }
        Ok(())
    }

    /// Users holding a role, ordered by user id
    #[instrument(skip(self))]
    pub async fn users_with_role(&self, role_id: RecordId) -> ServiceResult<Vec<UserResponse>> {
        let role = self.load_role(role_id).await?;
        let users = self
            .ctx
            .role_repo()
            .find_users(role.id)
            .await
            .map_err(ServiceError::store("find role members"))?;
        Ok(users.iter().map(UserResponse::from).collect())
    }
}
