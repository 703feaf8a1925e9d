//! Route definitions
//!
//! Resource routes are mounted under /api/v1; probes and the OpenAPI
//! document sit at the root.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{configs, health, roles, users};
use crate::openapi::{openapi_json, OPENAPI_PATH};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .merge(health_routes())
        .route(OPENAPI_PATH, get(openapi_json))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(role_routes())
        .merge(config_routes())
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/me", get(users::get_current_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/:id/profile",
            get(users::get_user_profile).put(users::update_user_profile),
        )
        .route("/users/:id/roles", get(users::get_user_roles))
        .route(
            "/users/:id/roles/:role_id",
            put(users::assign_role).delete(users::revoke_role),
        )
}

/// Role routes
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route(
            "/roles/:id",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .route("/roles/:id/users", get(roles::get_role_users))
}

/// Config routes
fn config_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/configs",
            get(configs::list_configs).post(configs::create_config),
        )
        .route("/configs/:key", get(configs::get_config))
}
