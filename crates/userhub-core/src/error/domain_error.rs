//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(RecordId),

    #[error("Profile not found for user: {0}")]
    ProfileNotFound(RecordId),

    #[error("Role not found: {0}")]
    RoleNotFound(RecordId),

    #[error("Role not found: {0}")]
    RoleNameNotFound(String),

    #[error("Config not found: {0}")]
    ConfigNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid user status code: {0}")]
    InvalidUserStatus(i16),

    #[error("Invalid gender code: {0}")]
    InvalidGender(i16),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Profile already exists for this user")]
    ProfileAlreadyExists,

    #[error("Role name already exists")]
    RoleNameAlreadyExists,

    #[error("Config key already exists")]
    ConfigKeyAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::RoleNotFound(_) | Self::RoleNameNotFound(_) => "UNKNOWN_ROLE",
            Self::ConfigNotFound(_) => "UNKNOWN_CONFIG",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUserStatus(_) => "INVALID_USER_STATUS",
            Self::InvalidGender(_) => "INVALID_GENDER",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::ProfileAlreadyExists => "PROFILE_ALREADY_EXISTS",
            Self::RoleNameAlreadyExists => "ROLE_ALREADY_EXISTS",
            Self::ConfigKeyAlreadyExists => "CONFIG_KEY_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProfileNotFound(_)
                | Self::RoleNotFound(_)
                | Self::RoleNameNotFound(_)
                | Self::ConfigNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidUserStatus(_) | Self::InvalidGender(_)
        )
    }

    /// Check if this is a conflict error (a unique constraint was hit)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists
                | Self::EmailAlreadyExists
                | Self::ProfileAlreadyExists
                | Self::RoleNameAlreadyExists
                | Self::ConfigKeyAlreadyExists
        )
    }
}
