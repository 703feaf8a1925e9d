//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;

use userhub_common::AppError;
use userhub_core::DomainError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (credentials, tokens, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Username, email, role name or config key already taken
    AlreadyExists(String),

    /// Validation error
    Validation(String),

    /// A storage call failed; `context` names the step that issued it
    Dependency {
        context: &'static str,
        source: DomainError,
    },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::AlreadyExists(msg) => write!(f, "Already exists: {msg}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Dependency { context, source } => write!(f, "failed to {context}: {source}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) | Self::Dependency { source: e, .. } => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create an already-exists error
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_credentials() -> Self {
        Self::App(AppError::InvalidCredentials)
    }

    pub fn invalid_token() -> Self {
        Self::App(AppError::InvalidToken)
    }

    /// Classify a storage error raised while performing `context`.
    ///
    /// Unique violations become `AlreadyExists` and missing rows keep their
    /// not-found meaning. Everything else is a dependency failure.
    ///
    /// ```ignore
    /// repo.create(&user, &hash).await.map_err(ServiceError::store("create user"))?;
    /// ```
    pub fn store(context: &'static str) -> impl FnOnce(DomainError) -> Self {
        move |source| {
            if source.is_conflict() {
                Self::AlreadyExists(source.to_string())
            } else if source.is_not_found() {
                Self::Domain(source)
            } else {
                Self::Dependency { context, source }
            }
        }
    }

    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }

    #[must_use]
    pub fn is_dependency_failure(&self) -> bool {
        matches!(self, Self::Dependency { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Domain(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::AlreadyExists(_) => 409,
            Self::Validation(_) => 400,
            Self::Dependency { .. } => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Dependency { .. } => "DEPENDENCY_FAILURE",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
