//! Service context - dependency container for services
//!
//! Holds all repositories and the credential services needed by services.

use std::sync::Arc;

use userhub_common::auth::{PasswordService, TokenService};
use userhub_core::traits::{
    ConfigRepository, ProfileRepository, RoleRepository, StoreHealth, UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It is cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    role_repo: Arc<dyn RoleRepository>,
    config_repo: Arc<dyn ConfigRepository>,
    store_health: Arc<dyn StoreHealth>,

    // Credentials
    token_service: Arc<TokenService>,
    password_service: PasswordService,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        role_repo: Arc<dyn RoleRepository>,
        config_repo: Arc<dyn ConfigRepository>,
        store_health: Arc<dyn StoreHealth>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            role_repo,
            config_repo,
            store_health,
            token_service,
            password_service: PasswordService::new(),
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the profile repository
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the role repository
    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    /// Get the config repository
    pub fn config_repo(&self) -> &dyn ConfigRepository {
        self.config_repo.as_ref()
    }

    pub fn store_health(&self) -> &dyn StoreHealth {
        self.store_health.as_ref()
    }

    // === Services ===

    /// Get the token service
    pub fn token_service(&self) -> &TokenService {
        self.token_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("token_service", &self.token_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    config_repo: Option<Arc<dyn ConfigRepository>>,
    store_health: Option<Arc<dyn StoreHealth>>,
    token_service: Option<Arc<TokenService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn config_repo(mut self, repo: Arc<dyn ConfigRepository>) -> Self {
        self.config_repo = Some(repo);
        self
    }

    pub fn store_health(mut self, health: Arc<dyn StoreHealth>) -> Self {
        self.store_health = Some(health);
        self
    }

    pub fn token_service(mut self, service: Arc<TokenService>) -> Self {
        self.token_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.profile_repo
                .ok_or_else(|| ServiceError::validation("profile_repo is required"))?,
            self.role_repo
                .ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            self.config_repo
                .ok_or_else(|| ServiceError::validation("config_repo is required"))?,
            self.store_health
                .ok_or_else(|| ServiceError::validation("store_health is required"))?,
            self.token_service
                .ok_or_else(|| ServiceError::validation("token_service is required"))?,
        ))
    }
}
