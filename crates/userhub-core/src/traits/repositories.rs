//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Implementations must enforce the unique constraints themselves and report
//! a violation with the matching conflict variant of [`DomainError`]. The
//! services rely on this as the final word on uniqueness.

use async_trait::async_trait;

use crate::entities::{
    ConfigEntry, ConfigFilter, NewConfigEntry, NewProfile, NewRole, NewUser, Profile, Role, User,
};
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by exact email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Insert a user, returning it with its assigned id.
    ///
    /// Fails with `UsernameAlreadyExists` / `EmailAlreadyExists` on a unique
    /// violation.
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Persist username, email and status in one write. `password_hash` of
    /// `None` keeps the stored hash.
    async fn update(&self, user: &User, password_hash: Option<&str>) -> RepoResult<User>;

    /// Hard delete a user. Profile and role associations go with it.
    async fn delete(&self, id: RecordId) -> RepoResult<()>;

    /// Page through users ordered by id
    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Vec<User>>;

    /// Total number of users
    async fn count(&self) -> RepoResult<i64>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: RecordId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile owned by a user
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Option<Profile>>;

    /// Insert a profile. Fails with `ProfileAlreadyExists` if the user has one.
    async fn create(&self, profile: &NewProfile) -> RepoResult<Profile>;

    /// Overwrite the editable fields of an existing profile
    async fn update(&self, profile: &Profile) -> RepoResult<Profile>;
}

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find role by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Role>>;

    /// Find role by unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>>;

    /// All roles ordered by id
    async fn list(&self) -> RepoResult<Vec<Role>>;

    /// Insert a role. Fails with `RoleNameAlreadyExists` on a duplicate name.
    async fn create(&self, role: &NewRole) -> RepoResult<Role>;

    /// Update name and description
    async fn update(&self, role: &Role) -> RepoResult<Role>;

    /// Delete a role and all its user associations
    async fn delete(&self, id: RecordId) -> RepoResult<()>;

    /// Roles held by a user, ordered by role id
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Role>>;

    /// Users holding a role, ordered by user id
    async fn find_users(&self, role_id: RecordId) -> RepoResult<Vec<User>>;

    /// Associate a role with a user. Returns `false` when the pair already
    /// existed; the existing row is left untouched.
    async fn add_to_user(&self, user_id: RecordId, role_id: RecordId) -> RepoResult<bool>;

    /// Remove an association. Returns `false` when there was nothing to remove.
    async fn remove_from_user(&self, user_id: RecordId, role_id: RecordId) -> RepoResult<bool>;
}

// ============================================================================
// Config Repository
// ============================================================================

#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Find entry by key
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<ConfigEntry>>;

    /// Insert an entry. Fails with `ConfigKeyAlreadyExists` on a duplicate key.
    async fn create(&self, entry: &NewConfigEntry) -> RepoResult<ConfigEntry>;

    /// Entries matching the filter, ordered by key
    async fn list(&self, filter: &ConfigFilter) -> RepoResult<Vec<ConfigEntry>>;
}

// ============================================================================
// Store Health
// ============================================================================

/// Liveness probe for the backing store
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> RepoResult<()>;
}
