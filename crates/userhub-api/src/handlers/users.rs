//! User handlers
//!
//! Endpoints for registration, login, accounts, profiles and user roles.

use axum::{extract::State, Json};
use userhub_service::{
    AuthService, LoginRequest, MessageResponse, ProfileResponse, RegisterRequest, RoleService,
    TokenResponse, UpdateProfileRequest, UpdateUserRequest, UserListResponse, UserResponse,
    UserService, UserWithProfileResponse, UserWithRolesResponse,
};

use crate::extractors::{AuthUser, Pagination, RecordIdPath, UserRolePath, ValidatedJson};
use crate::response::{ApiResult, ErrorBody, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /users/register
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Username or email taken", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let registration = service.register(request).await?;
    Ok(Json(UserResponse::from(&registration.user)))
}

/// Login with username and password
///
/// POST /users/login
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid username or password", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Get the user the bearer token belongs to
///
/// GET /users/me
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(auth.user_id).await?;
    Ok(Json(response))
}

/// List users
///
/// GET /users?page=&size=
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(
        ("page" = Option<i64>, Query, description = "Page number, from 1"),
        ("size" = Option<i64>, Query, description = "Page size, default 10")
    ),
    responses(
        (status = 200, description = "One page of users", body = UserListResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<UserListResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.list_users(pagination.page, pagination.size).await?;
    Ok(Json(response))
}

/// Get user by ID
///
/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    RecordIdPath(user_id): RecordIdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// Update a user
///
/// PUT /users/{id}
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 409, description = "Username or email taken", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    RecordIdPath(user_id): RecordIdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    service.update_user(user_id, request).await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// Delete a user
///
/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    RecordIdPath(user_id): RecordIdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    service.delete_user(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Get a user with their profile
///
/// GET /users/{id}/profile
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/profile",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User and profile", body = UserWithProfileResponse),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn get_user_profile(
    State(state): State<AppState>,
    RecordIdPath(user_id): RecordIdPath,
) -> ApiResult<Json<UserWithProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user_with_profile(user_id).await?;
    Ok(Json(response))
}

/// Update a user's profile
///
/// PUT /users/{id}/profile
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/profile",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn update_user_profile(
    State(state): State<AppState>,
    RecordIdPath(user_id): RecordIdPath,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(user_id, request).await?;
    Ok(Json(response))
}

/// Get a user with their roles
///
/// GET /users/{id}/roles
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/roles",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User and roles", body = UserWithRolesResponse),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn get_user_roles(
    State(state): State<AppState>,
    RecordIdPath(user_id): RecordIdPath,
) -> ApiResult<Json<UserWithRolesResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user_with_roles(user_id).await?;
    Ok(Json(response))
}

/// Assign a role to a user
///
/// PUT /users/{id}/roles/{role_id}
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/roles/{role_id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id"),
        ("role_id" = i64, Path, description = "Role id")
    ),
    responses(
        (status = 204, description = "Role assigned"),
        (status = 404, description = "No such user or role", body = ErrorBody)
    )
)]
pub async fn assign_role(
    State(state): State<AppState>,
    path: UserRolePath,
) -> ApiResult<NoContent> {
    let service = RoleService::new(state.service_context());
    service.assign_role(path.user_id, path.role_id).await?;
    Ok(NoContent)
}

/// Revoke a role from a user
///
/// DELETE /users/{id}/roles/{role_id}
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/roles/{role_id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id"),
        ("role_id" = i64, Path, description = "Role id")
    ),
    responses(
        (status = 204, description = "Role revoked"),
        (status = 404, description = "No such user or role", body = ErrorBody)
    )
)]
pub async fn revoke_role(
    State(state): State<AppState>,
    path: UserRolePath,
) -> ApiResult<NoContent> {
    let service = RoleService::new(state.service_context());
    service.revoke_role(path.user_id, path.role_id).await?;
    Ok(NoContent)
}
