//! Config handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use userhub_service::{ConfigResponse, ConfigService, CreateConfigRequest};
use utoipa::IntoParams;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created, ErrorBody};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfigListQuery {
    /// Only keys starting with this prefix
    pub prefix: Option<String>,
}

/// List config entries
///
/// GET /configs?prefix=
#[utoipa::path(
    get,
    path = "/api/v1/configs",
    tag = "configs",
    params(ConfigListQuery),
    responses((status = 200, description = "Entries ordered by key", body = Vec<ConfigResponse>))
)]
pub async fn list_configs(
    State(state): State<AppState>,
    Query(query): Query<ConfigListQuery>,
) -> ApiResult<Json<Vec<ConfigResponse>>> {
    let service = ConfigService::new(state.service_context());
    let entries = service.list(query.prefix).await?;
    Ok(Json(entries))
}

/// Create a config entry
///
/// POST /configs
#[utoipa::path(
    post,
    path = "/api/v1/configs",
    tag = "configs",
    request_body = CreateConfigRequest,
    responses(
        (status = 201, description = "Entry created", body = ConfigResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Key taken", body = ErrorBody)
    )
)]
pub async fn create_config(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateConfigRequest>,
) -> ApiResult<Created<Json<ConfigResponse>>> {
    let service = ConfigService::new(state.service_context());
    let entry = service.create(request).await?;
    Ok(Created(Json(entry)))
}

/// Get a config entry by key
///
/// GET /configs/{key}
#[utoipa::path(
    get,
    path = "/api/v1/configs/{key}",
    tag = "configs",
    params(("key" = String, Path, description = "Config key")),
    responses(
        (status = 200, description = "Entry", body = ConfigResponse),
        (status = 404, description = "No such key", body = ErrorBody)
    )
)]
pub async fn get_config(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<ConfigResponse>> {
    let service = ConfigService::new(state.service_context());
    let entry = service.get(&key).await?;
    Ok(Json(entry))
}
