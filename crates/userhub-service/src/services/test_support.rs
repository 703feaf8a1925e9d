//! Shared fixtures for service tests: contexts over the memory store and a
//! wrapper that injects storage failures into selected calls.

use std::sync::Arc;

use async_trait::async_trait;
use userhub_common::TokenService;
use userhub_core::entities::{
    ConfigEntry, ConfigFilter, NewConfigEntry, NewProfile, NewRole, NewUser, Profile, Role, User,
};
use userhub_core::traits::{
    ConfigRepository, ProfileRepository, RepoResult, RoleRepository, StoreHealth, UserRepository,
};
use userhub_core::{DomainError, RecordId};
use userhub_db::MemoryStore;

use super::context::{ServiceContext, ServiceContextBuilder};

pub(crate) const TEST_SECRET: &str = "test-secret-key-for-service-tests";

fn context_over<S>(store: Arc<S>) -> ServiceContext
where
    S: UserRepository + ProfileRepository + RoleRepository + ConfigRepository + StoreHealth + 'static,
{
    ServiceContextBuilder::new()
        .user_repo(store.clone())
        .profile_repo(store.clone())
        .role_repo(store.clone())
        .config_repo(store.clone())
        .store_health(store)
        .token_service(Arc::new(TokenService::new(TEST_SECRET, 24 * 60 * 60)))
        .build()
        .expect("complete context")
}

pub(crate) fn memory_context() -> (ServiceContext, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (context_over(store.clone()), store)
}

pub(crate) fn context_with(faults: Faults) -> (ServiceContext, Arc<FaultyStore>) {
    let store = Arc::new(FaultyStore::new(MemoryStore::new(), faults));
    (context_over(store.clone()), store)
}

/// Which calls fail with an injected storage error
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Faults {
    /// User lookups by id, username or email fail
    pub fail_user_lookup: bool,
    /// Username and email lookups report nothing, so inserts hit the unique
    /// constraint
    pub hide_existing_users: bool,
    pub fail_user_create: bool,
    pub fail_user_count: bool,
    pub fail_profile_create: bool,
    pub fail_role_assign: bool,
    pub fail_ping: bool,
}

pub(crate) struct FaultyStore {
    inner: MemoryStore,
    faults: Faults,
}

impl FaultyStore {
    pub(crate) fn new(inner: MemoryStore, faults: Faults) -> Self {
        Self { inner, faults }
    }

    pub(crate) fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(enabled: bool) -> RepoResult<()> {
        if enabled {
            Err(DomainError::DatabaseError("injected fault".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for FaultyStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        Self::check(self.faults.fail_user_lookup)?;
        UserRepository::find_by_id(&self.inner, id).await
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Self::check(self.faults.fail_user_lookup)?;
        if self.faults.hide_existing_users {
            return Ok(None);
        }
        self.inner.find_by_username(username).await
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Self::check(self.faults.fail_user_lookup)?;
        if self.faults.hide_existing_users {
            return Ok(None);
        }
        self.inner.find_by_email(email).await
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        Self::check(self.faults.fail_user_create)?;
        UserRepository::create(&self.inner, user, password_hash).await
    }

    async fn update(&self, user: &User, password_hash: Option<&str>) -> RepoResult<User> {
        UserRepository::update(&self.inner, user, password_hash).await
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        UserRepository::delete(&self.inner, id).await
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Vec<User>> {
        UserRepository::list(&self.inner, offset, limit).await
    }

    async fn count(&self) -> RepoResult<i64> {
        Self::check(self.faults.fail_user_count)?;
        self.inner.count().await
    }

    async fn get_password_hash(&self, id: RecordId) -> RepoResult<Option<String>> {
        self.inner.get_password_hash(id).await
    }
}

#[async_trait]
impl ProfileRepository for FaultyStore {
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Option<Profile>> {
        ProfileRepository::find_by_user(&self.inner, user_id).await
    }

    async fn create(&self, profile: &NewProfile) -> RepoResult<Profile> {
        Self::check(self.faults.fail_profile_create)?;
        ProfileRepository::create(&self.inner, profile).await
    }

    async fn update(&self, profile: &Profile) -> RepoResult<Profile> {
        ProfileRepository::update(&self.inner, profile).await
    }
}

#[async_trait]
impl RoleRepository for FaultyStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Role>> {
        RoleRepository::find_by_id(&self.inner, id).await
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        self.inner.find_by_name(name).await
    }

    async fn list(&self) -> RepoResult<Vec<Role>> {
        RoleRepository::list(&self.inner).await
    }

    async fn create(&self, role: &NewRole) -> RepoResult<Role> {
        RoleRepository::create(&self.inner, role).await
    }

    async fn update(&self, role: &Role) -> RepoResult<Role> {
        RoleRepository::update(&self.inner, role).await
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        RoleRepository::delete(&self.inner, id).await
    }

    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Role>> {
        RoleRepository::find_by_user(&self.inner, user_id).await
    }

    async fn find_users(&self, role_id: RecordId) -> RepoResult<Vec<User>> {
        self.inner.find_users(role_id).await
    }

    async fn add_to_user(&self, user_id: RecordId, role_id: RecordId) -> RepoResult<bool> {
        Self::check(self.faults.fail_role_assign)?;
        self.inner.add_to_user(user_id, role_id).await
    }

    async fn remove_from_user(&self, user_id: RecordId, role_id: RecordId) -> RepoResult<bool> {
        self.inner.remove_from_user(user_id, role_id).await
    }
}

#[async_trait]
impl ConfigRepository for FaultyStore {
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<ConfigEntry>> {
        self.inner.find_by_key(key).await
    }

    async fn create(&self, entry: &NewConfigEntry) -> RepoResult<ConfigEntry> {
        ConfigRepository::create(&self.inner, entry).await
    }

    async fn list(&self, filter: &ConfigFilter) -> RepoResult<Vec<ConfigEntry>> {
        ConfigRepository::list(&self.inner, filter).await
    }
}

#[async_trait]
impl StoreHealth for FaultyStore {
    async fn ping(&self) -> RepoResult<()> {
        Self::check(self.faults.fail_ping)?;
        self.inner.ping().await
    }
}
