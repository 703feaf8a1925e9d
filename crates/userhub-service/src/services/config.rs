//! Config service
//!
//! Key-value settings stored beside the user data.

use tracing::{info, instrument};
use userhub_core::entities::{ConfigFilter, NewConfigEntry};

use crate::dto::{ConfigResponse, CreateConfigRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct ConfigService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConfigService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Entries whose key starts with `key_prefix`, or all entries, ordered by key
    #[instrument(skip(self))]
    pub async fn list(&self, key_prefix: Option<String>) -> ServiceResult<Vec<ConfigResponse>> {
        let filter = ConfigFilter {
            key_prefix: key_prefix.filter(|p| !p.is_empty()),
        };
        let entries = self
            .ctx
            .config_repo()
            .list(&filter)
            .await
            .map_err(ServiceError::store("list configs"))?;
        Ok(entries.iter().map(ConfigResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> ServiceResult<ConfigResponse> {
        let entry = self
            .ctx
            .config_repo()
            .find_by_key(key)
            .await
            .map_err(ServiceError::store("find config"))?
            .ok_or_else(|| ServiceError::not_found("Config", key))?;
        Ok(ConfigResponse::from(&entry))
    }

    #[instrument(skip(self, request), fields(key = %request.key))]
    pub async fn create(&self, request: CreateConfigRequest) -> ServiceResult<ConfigResponse> {
        let configs = self.ctx.config_repo();

        if configs
            .find_by_key(&request.key)
            .await
            .map_err(ServiceError::store("check config key"))?
            .is_some()
        {
            return Err(ServiceError::already_exists("Config key already exists"));
        }

        let entry = configs
            .create(&NewConfigEntry {
                key: request.key,
                value: request.value,
            })
            .await
            .map_err(ServiceError::store("create config"))?;

        info!(config_id = %entry.id, key = %entry.key, "Config created");

        Ok(ConfigResponse::from(&entry))
    }
}
