//! Path parameter extractors
//!
//! Type-safe extraction of record ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use userhub_core::RecordId;

use crate::response::ApiError;

/// A single record id from a route with one path parameter
#[derive(Debug, Clone, Copy)]
pub struct RecordIdPath(pub RecordId);

#[async_trait]
impl<S> FromRequestParts<S> for RecordIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        RecordId::parse(&raw)
            .map(RecordIdPath)
            .map_err(|e| ApiError::invalid_path(format!("id '{raw}': {e}")))
    }
}

/// Raw `/:id/roles/:role_id` parameters
#[derive(Debug, Deserialize)]
struct RawUserRolePath {
    id: String,
    role_id: String,
}

/// A user id and a role id from `/users/:id/roles/:role_id`
#[derive(Debug, Clone, Copy)]
pub struct UserRolePath {
    pub user_id: RecordId,
    pub role_id: RecordId,
}

impl UserRolePath {
    fn parse(raw: &RawUserRolePath) -> Result<Self, ApiError> {
        let user_id = RecordId::parse(&raw.id)
            .map_err(|_| ApiError::invalid_path("Invalid user id format"))?;
        let role_id = RecordId::parse(&raw.role_id)
            .map_err(|_| ApiError::invalid_path("Invalid role id format"))?;
        Ok(Self { user_id, role_id })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserRolePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawUserRolePath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Self::parse(&raw)
    }
}
