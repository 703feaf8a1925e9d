//! Role handlers
//!
//! Endpoints for role management.

use axum::{extract::State, Json};
use userhub_service::{
    CreateRoleRequest, RoleResponse, RoleService, UpdateRoleRequest, UserResponse,
};

use crate::extractors::{RecordIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// List all roles
///
/// GET /roles
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "roles",
    responses((status = 200, description = "All roles", body = Vec<RoleResponse>))
)]
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Json<Vec<RoleResponse>>> {
    let service = RoleService::new(state.service_context());
    let roles = service.list_roles().await?;
    Ok(Json(roles))
}

/// Create a role
///
/// POST /roles
#[utoipa::path(
    post,
    path = "/api/v1/roles",
    tag = "roles",
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = RoleResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Role name taken", body = ErrorBody)
    )
)]
pub async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<Created<Json<RoleResponse>>> {
    let service = RoleService::new(state.service_context());
    let role = service.create_role(request).await?;
    Ok(Created(Json(role)))
}

/// Get a role
///
/// GET /roles/{id}
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role", body = RoleResponse),
        (status = 404, description = "No such role", body = ErrorBody)
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    RecordIdPath(role_id): RecordIdPath,
) -> ApiResult<Json<RoleResponse>> {
    let service = RoleService::new(state.service_context());
    let role = service.get_role(role_id).await?;
    Ok(Json(role))
}

/// Update a role
///
/// PUT /roles/{id}
#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = RoleResponse),
        (status = 404, description = "No such role", body = ErrorBody),
        (status = 409, description = "Role name taken", body = ErrorBody)
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    RecordIdPath(role_id): RecordIdPath,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let service = RoleService::new(state.service_context());
    let role = service.update_role(role_id, request).await?;
    Ok(Json(role))
}

/// Delete a role
///
/// DELETE /roles/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "No such role", body = ErrorBody)
    )
)]
pub async fn delete_role(
    State(state): State<AppState>,
    RecordIdPath(role_id): RecordIdPath,
) -> ApiResult<NoContent> {
    let service = RoleService::new(state.service_context());
    service.delete_role(role_id).await?;
    Ok(NoContent)
}

/// Users holding a role
///
/// GET /roles/{id}/users
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}/users",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Users holding the role", body = Vec<UserResponse>),
        (status = 404, description = "No such role", body = ErrorBody)
    )
)]
pub async fn get_role_users(
    State(state): State<AppState>,
    RecordIdPath(role_id): RecordIdPath,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = RoleService::new(state.service_context());
    let users = service.users_with_role(role_id).await?;
    Ok(Json(users))
}
