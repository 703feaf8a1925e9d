//! Test fixtures and data generators
//!
//! Request bodies are defined here so the tests send exactly what a client
//! would. Response bodies reuse the service DTOs.

use anyhow::Result;
use reqwest::StatusCode;
use serde::Serialize;
use userhub_service::{TokenResponse, UserResponse};

use crate::helpers::{assert_json, TestServer};

/// Get a unique suffix for test data
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user_{suffix}"),
            email: format!("user_{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

/// User update request
#[derive(Debug, Serialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Role create/update request
#[derive(Debug, Serialize)]
pub struct RoleRequest {
    pub name: String,
    pub description: String,
}

impl RoleRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("role_{}", unique_suffix()),
            description: "Created by a test".to_string(),
        }
    }
}

/// Config create request
#[derive(Debug, Serialize)]
pub struct ConfigRequest {
    pub key: String,
    pub value: String,
}

impl ConfigRequest {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Register a fresh user and return the request that created it
pub async fn register_user(server: &TestServer) -> Result<(RegisterRequest, UserResponse)> {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/users/register", &request).await?;
    let user = assert_json(response, StatusCode::OK).await?;
    Ok((request, user))
}

/// Register a fresh user and log in as them
pub async fn register_and_login(server: &TestServer) -> Result<(UserResponse, TokenResponse)> {
    let (request, user) = register_user(server).await?;
    let response = server
        .post("/api/v1/users/login", &LoginRequest::from_register(&request))
        .await?;
    let token = assert_json(response, StatusCode::OK).await?;
    Ok((user, token))
}
