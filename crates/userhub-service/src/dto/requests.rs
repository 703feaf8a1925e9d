//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

/// Treat `""` the same as an absent field
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// ============================================================================
// User Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Replace username and email; change the password only when one is given
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Omitted or empty keeps the current password
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// Overwrite every editable profile field
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 64, message = "Nickname must be at most 64 characters"))]
    pub nickname: String,

    #[validate(length(max = 255, message = "Avatar must be at most 255 characters"))]
    pub avatar: String,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: String,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: String,

    /// 0 unknown, 1 male, 2 female
    #[validate(range(min = 0, max = 2, message = "Gender must be 0, 1 or 2"))]
    pub gender: i16,

    #[validate(length(max = 32, message = "Birthday must be at most 32 characters"))]
    pub birthday: String,
}

// ============================================================================
// Role Requests
// ============================================================================

/// Create role request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "Role name must be 1-50 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: String,
}

/// Update role request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "Role name must be 1-50 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: String,
}

// ============================================================================
// Config Requests
// ============================================================================

/// Create config entry request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateConfigRequest {
    #[validate(length(min = 1, max = 128, message = "Key must be 1-128 characters"))]
    pub key: String,

    pub value: String,
}
