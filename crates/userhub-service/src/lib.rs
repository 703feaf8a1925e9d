//! # userhub-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    AuthService, ConfigService, HealthService, Registration, RoleService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StepOutcome, UserService, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE,
};
