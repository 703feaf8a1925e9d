//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod health;
pub mod role;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use auth::{AuthService, Registration, StepOutcome};
pub use config::ConfigService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use role::RoleService;
pub use user::{page_window, UserService, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
