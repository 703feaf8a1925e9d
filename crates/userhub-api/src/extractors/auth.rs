//! Authentication extractor
//!
//! Extracts the bearer token from the Authorization header and resolves it to
//! an active user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use userhub_core::RecordId;
use userhub_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from a bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: RecordId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: RecordId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let user_id = AuthService::new(app_state.service_context())
            .validate_token(bearer.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::from(e)
            })?;

        Ok(AuthUser::new(user_id))
    }
}
