//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use userhub_core::error::DomainError;
use userhub_core::value_objects::RecordId;

/// Constraint names declared in `migrations/0001_schema.sql`
pub const USERS_USERNAME_KEY: &str = "users_username_key";
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback.
/// `on_unique` receives the violated constraint name when the driver reports it.
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Unique violation on the users table
///
/// A driver that omits the constraint name is treated as a username clash.
pub fn user_conflict(constraint: Option<&str>) -> DomainError {
    match constraint {
        Some(USERS_EMAIL_KEY) => DomainError::EmailAlreadyExists,
        Some(USERS_USERNAME_KEY) | None => DomainError::UsernameAlreadyExists,
        Some(other) => {
            DomainError::DatabaseError(format!("unexpected unique violation: {other}"))
        }
    }
}

/// Create a "user not found" error
pub fn user_not_found(id: RecordId) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "profile not found" error
pub fn profile_not_found(user_id: RecordId) -> DomainError {
    DomainError::ProfileNotFound(user_id)
}

/// Create a "role not found" error
pub fn role_not_found(id: RecordId) -> DomainError {
    DomainError::RoleNotFound(id)
}
