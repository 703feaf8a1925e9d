//! OpenAPI document for the HTTP surface

use axum::Json;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::{configs, health, roles, users};
use crate::response::{ErrorBody, ErrorDetail};

/// Path the document is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness_check,

        users::register,
        users::login,
        users::get_current_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::get_user_profile,
        users::update_user_profile,
        users::get_user_roles,
        users::assign_role,
        users::revoke_role,

        roles::list_roles,
        roles::create_role,
        roles::get_role,
        roles::update_role,
        roles::delete_role,
        roles::get_role_users,

        configs::list_configs,
        configs::create_config,
        configs::get_config,
    ),
    components(
        schemas(
            userhub_service::RegisterRequest,
            userhub_service::LoginRequest,
            userhub_service::UpdateUserRequest,
            userhub_service::UpdateProfileRequest,
            userhub_service::CreateRoleRequest,
            userhub_service::UpdateRoleRequest,
            userhub_service::CreateConfigRequest,
            userhub_service::MessageResponse,
            userhub_service::UserResponse,
            userhub_service::TokenResponse,
            userhub_service::UserListResponse,
            userhub_service::ProfileResponse,
            userhub_service::UserWithProfileResponse,
            userhub_service::UserWithRolesResponse,
            userhub_service::RoleResponse,
            userhub_service::ConfigResponse,
            userhub_service::HealthResponse,
            userhub_service::ReadinessResponse,
            userhub_service::HealthChecks,
            ErrorBody,
            ErrorDetail,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "users", description = "Accounts, login, profiles and user roles"),
        (name = "roles", description = "Role management"),
        (name = "configs", description = "Key/value configuration entries"),
    ),
    info(
        title = "userhub API",
        description = "User, role, profile and configuration management."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serve the generated document
///
/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
