//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateConfigRequest, CreateRoleRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
    UpdateRoleRequest, UpdateUserRequest,
};

pub use responses::{
    ConfigResponse, HealthChecks, HealthResponse, MessageResponse, ProfileResponse,
    ReadinessResponse, RoleResponse, TokenResponse, UserListResponse, UserResponse,
    UserWithProfileResponse, UserWithRolesResponse,
};
