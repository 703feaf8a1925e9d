//! `MemoryStore`: tables, id sequences and the repository impls
//!
//! All tables sit behind one mutex so multi-table checks and cascades happen
//! atomically.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::instrument;

use userhub_core::entities::{
    ConfigEntry, ConfigFilter, NewConfigEntry, NewProfile, NewRole, NewUser, Profile, Role, User,
    UserRole, ADMIN_ROLE_NAME, DEFAULT_ROLE_NAME,
};
use userhub_core::error::DomainError;
use userhub_core::traits::{
    ConfigRepository, ProfileRepository, RepoResult, RoleRepository, StoreHealth, UserRepository,
};
use userhub_core::value_objects::RecordId;

struct UserRow {
    user: User,
    password_hash: String,
}

/// Monotonic id source, one per table, starting at 1
#[derive(Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> RecordId {
        self.0 += 1;
        RecordId::new(self.0)
    }
}

#[derive(Default)]
struct Tables {
    user_seq: Sequence,
    profile_seq: Sequence,
    role_seq: Sequence,
    config_seq: Sequence,
    users: BTreeMap<RecordId, UserRow>,
    /// Keyed by owning user id
    profiles: BTreeMap<RecordId, Profile>,
    roles: BTreeMap<RecordId, Role>,
    user_roles: BTreeMap<(RecordId, RecordId), UserRole>,
    configs: BTreeMap<String, ConfigEntry>,
}

impl Tables {
    fn username_taken(&self, username: &str, except: Option<RecordId>) -> bool {
        self.users
            .values()
            .any(|row| row.user.username == username && Some(row.user.id) != except)
    }

    fn email_taken(&self, email: &str, except: Option<RecordId>) -> bool {
        self.users
            .values()
            .any(|row| row.user.email == email && Some(row.user.id) != except)
    }

    fn role_name_taken(&self, name: &str, except: Option<RecordId>) -> bool {
        self.roles
            .values()
            .any(|role| role.name == name && Some(role.id) != except)
    }

    fn insert_role(&mut self, name: &str, description: &str) -> Role {
        let now = Utc::now();
        let role = Role {
            id: self.role_seq.next(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.roles.insert(role.id, role.clone());
        role
    }
}

fn foreign_key_violation(table: &str, id: RecordId) -> DomainError {
    DomainError::DatabaseError(format!(
        "foreign key violation: {table} row {id} does not exist"
    ))
}

/// Thread-safe in-memory implementation of all repositories.
///
/// Cloning is cheap and every clone sees the same tables.
#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store seeded with the `admin` and `user` roles
    pub fn new() -> Self {
        let mut tables = Tables::default();
        tables.insert_role(ADMIN_ROLE_NAME, "Administrator role");
        tables.insert_role(DEFAULT_ROLE_NAME, "Regular user role");
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    /// Number of stored profiles
    pub fn profile_count(&self) -> usize {
        self.tables.lock().profiles.len()
    }

    /// Number of stored user-role associations
    pub fn association_count(&self) -> usize {
        self.tables.lock().user_roles.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.lock();
        f.debug_struct("MemoryStore")
            .field("users", &tables.users.len())
            .field("roles", &tables.roles.len())
            .field("configs", &tables.configs.len())
            .finish()
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().users.get(&id).map(|row| row.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let tables = self.tables.lock();
        Ok(tables
            .users
            .values()
            .find(|row| row.user.username == username)
            .map(|row| row.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let tables = self.tables.lock();
        Ok(tables
            .users
            .values()
            .find(|row| row.user.email == email)
            .map(|row| row.user.clone()))
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut tables = self.tables.lock();
        if tables.username_taken(&user.username, None) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if tables.email_taken(&user.email, None) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let created = User {
            id: tables.user_seq.next(),
            username: user.username.clone(),
            email: user.email.clone(),
            status: user.status,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(
            created.id,
            UserRow {
                user: created.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(created)
    }

    #[instrument(skip(self, password_hash), fields(user_id = %user.id))]
    async fn update(&self, user: &User, password_hash: Option<&str>) -> RepoResult<User> {
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&user.id) {
            return Err(DomainError::UserNotFound(user.id));
        }
        if tables.username_taken(&user.username, Some(user.id)) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let row = tables
            .users
            .get_mut(&user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        row.user.username.clone_from(&user.username);
        row.user.email.clone_from(&user.email);
        row.user.status = user.status;
        row.user.updated_at = Utc::now();
        if let Some(hash) = password_hash {
            row.password_hash = hash.to_string();
        }
        Ok(row.user.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.users.remove(&id).is_none() {
            return Err(DomainError::UserNotFound(id));
        }
        tables.profiles.remove(&id);
        tables.user_roles.retain(|(user_id, _), _| *user_id != id);
        Ok(())
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Vec<User>> {
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let tables = self.tables.lock();
        Ok(tables
            .users
            .values()
            .skip(offset)
            .take(limit)
            .map(|row| row.user.clone())
            .collect())
    }

    async fn count(&self) -> RepoResult<i64> {
        let len = self.tables.lock().users.len();
        Ok(i64::try_from(len).unwrap_or(i64::MAX))
    }

    async fn get_password_hash(&self, id: RecordId) -> RepoResult<Option<String>> {
        Ok(self
            .tables
            .lock()
            .users
            .get(&id)
            .map(|row| row.password_hash.clone()))
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Option<Profile>> {
        Ok(self.tables.lock().profiles.get(&user_id).cloned())
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn create(&self, profile: &NewProfile) -> RepoResult<Profile> {
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&profile.user_id) {
            return Err(foreign_key_violation("users", profile.user_id));
        }
        if tables.profiles.contains_key(&profile.user_id) {
            return Err(DomainError::ProfileAlreadyExists);
        }

        let now = Utc::now();
        let created = Profile {
            id: tables.profile_seq.next(),
            user_id: profile.user_id,
            nickname: profile.nickname.clone(),
            avatar: profile.avatar.clone(),
            bio: profile.bio.clone(),
            phone: profile.phone.clone(),
            gender: profile.gender,
            birthday: profile.birthday.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.profiles.insert(created.user_id, created.clone());
        Ok(created)
    }

    async fn update(&self, profile: &Profile) -> RepoResult<Profile> {
        let mut tables = self.tables.lock();
        let stored = tables
            .profiles
            .get_mut(&profile.user_id)
            .ok_or(DomainError::ProfileNotFound(profile.user_id))?;

        stored.nickname.clone_from(&profile.nickname);
        stored.avatar.clone_from(&profile.avatar);
        stored.bio.clone_from(&profile.bio);
        stored.phone.clone_from(&profile.phone);
        stored.gender = profile.gender;
        stored.birthday.clone_from(&profile.birthday);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

// ============================================================================
// Roles
// ============================================================================

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Role>> {
        Ok(self.tables.lock().roles.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        let tables = self.tables.lock();
        Ok(tables.roles.values().find(|r| r.name == name).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Role>> {
        Ok(self.tables.lock().roles.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, role: &NewRole) -> RepoResult<Role> {
        let mut tables = self.tables.lock();
        if tables.role_name_taken(&role.name, None) {
            return Err(DomainError::RoleNameAlreadyExists);
        }
        Ok(tables.insert_role(&role.name, &role.description))
    }

    #[instrument(skip(self), fields(role_id = %role.id))]
    async fn update(&self, role: &Role) -> RepoResult<Role> {
        let mut tables = self.tables.lock();
        if tables.role_name_taken(&role.name, Some(role.id)) {
            return Err(DomainError::RoleNameAlreadyExists);
        }
        let stored = tables
            .roles
            .get_mut(&role.id)
            .ok_or(DomainError::RoleNotFound(role.id))?;
        stored.name.clone_from(&role.name);
        stored.description.clone_from(&role.description);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.roles.remove(&id).is_none() {
            return Err(DomainError::RoleNotFound(id));
        }
        tables.user_roles.retain(|(_, role_id), _| *role_id != id);
        Ok(())
    }

    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Role>> {
        let tables = self.tables.lock();
        let mut roles: Vec<Role> = tables
            .user_roles
            .keys()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, role_id)| tables.roles.get(role_id).cloned())
            .collect();
        roles.sort_by_key(|r| r.id);
        Ok(roles)
    }

    async fn find_users(&self, role_id: RecordId) -> RepoResult<Vec<User>> {
        let tables = self.tables.lock();
        let mut users: Vec<User> = tables
            .user_roles
            .keys()
            .filter(|(_, rid)| *rid == role_id)
            .filter_map(|(user_id, _)| tables.users.get(user_id).map(|row| row.user.clone()))
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn add_to_user(&self, user_id: RecordId, role_id: RecordId) -> RepoResult<bool> {
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&user_id) {
            return Err(foreign_key_violation("users", user_id));
        }
        if !tables.roles.contains_key(&role_id) {
            return Err(foreign_key_violation("roles", role_id));
        }
        if tables.user_roles.contains_key(&(user_id, role_id)) {
            return Ok(false);
        }
        tables.user_roles.insert(
            (user_id, role_id),
            UserRole {
                user_id,
                role_id,
                created_at: Utc::now(),
            },
        );
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn remove_from_user(&self, user_id: RecordId, role_id: RecordId) -> RepoResult<bool> {
        Ok(self
            .tables
            .lock()
            .user_roles
            .remove(&(user_id, role_id))
            .is_some())
    }
}

// ============================================================================
// Config entries
// ============================================================================

#[async_trait]
impl ConfigRepository for MemoryStore {
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<ConfigEntry>> {
        Ok(self.tables.lock().configs.get(key).cloned())
    }

    #[instrument(skip(self, entry), fields(key = %entry.key))]
    async fn create(&self, entry: &NewConfigEntry) -> RepoResult<ConfigEntry> {
        let mut tables = self.tables.lock();
        if tables.configs.contains_key(&entry.key) {
            return Err(DomainError::ConfigKeyAlreadyExists);
        }
        let now = Utc::now();
        let created = ConfigEntry {
            id: tables.config_seq.next(),
            key: entry.key.clone(),
            value: entry.value.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.configs.insert(created.key.clone(), created.clone());
        Ok(created)
    }

    async fn list(&self, filter: &ConfigFilter) -> RepoResult<Vec<ConfigEntry>> {
        // BTreeMap iteration is already ordered by key
        let tables = self.tables.lock();
        Ok(tables
            .configs
            .values()
            .filter(|entry| filter.matches(&entry.key))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(store: &MemoryStore, name: &str) -> User {
        UserRepository::create(
            store,
            &NewUser::active(name, format!("{name}@example.com")),
            "hash",
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_seeded_roles() {
        let store = MemoryStore::new();
        let roles = RoleRepository::list(&store).await.unwrap();
        let names: Vec<_> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["admin", "user"]);
    }

    #[tokio::test]
    async fn test_user_ids_start_at_one() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;
        assert_eq!(alice.id, RecordId::new(1));
        assert_eq!(bob.id, RecordId::new(2));
    }

    #[tokio::test]
    async fn test_unique_username_and_email() {
        let store = MemoryStore::new();
        seed_user(&store, "alice").await;

        let dup_name = UserRepository::create(&store, &NewUser::active("alice", "x@y.z"), "h").await;
        assert!(matches!(dup_name, Err(DomainError::UsernameAlreadyExists)));

        let dup_mail =
            UserRepository::create(&store, &NewUser::active("other", "alice@example.com"), "h")
                .await;
        assert!(matches!(dup_mail, Err(DomainError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_update_keeps_hash_when_none() {
        let store = MemoryStore::new();
        let mut alice = seed_user(&store, "alice").await;
        alice.email = "new@example.com".to_string();

        UserRepository::update(&store, &alice, None).await.unwrap();
        assert_eq!(
            store.get_password_hash(alice.id).await.unwrap().as_deref(),
            Some("hash")
        );

        UserRepository::update(&store, &alice, Some("hash2")).await.unwrap();
        assert_eq!(
            store.get_password_hash(alice.id).await.unwrap().as_deref(),
            Some("hash2")
        );
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        ProfileRepository::create(&store, &NewProfile::default_for(alice.id, "alice"))
            .await
            .unwrap();
        store.add_to_user(alice.id, RecordId::new(2)).await.unwrap();

        UserRepository::delete(&store, alice.id).await.unwrap();
        assert_eq!(store.profile_count(), 0);
        assert_eq!(store.association_count(), 0);
        assert!(matches!(
            UserRepository::delete(&store, alice.id).await,
            Err(DomainError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_association_is_idempotent() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let role = RecordId::new(2);

        assert!(store.add_to_user(alice.id, role).await.unwrap());
        assert!(!store.add_to_user(alice.id, role).await.unwrap());
        assert_eq!(store.association_count(), 1);

        assert!(store.remove_from_user(alice.id, role).await.unwrap());
        assert!(!store.remove_from_user(alice.id, role).await.unwrap());
    }

    #[tokio::test]
    async fn test_association_requires_rows() {
        let store = MemoryStore::new();
        let result = store.add_to_user(RecordId::new(42), RecordId::new(1)).await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_one_profile_per_user() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let draft = NewProfile::default_for(alice.id, "alice");

        ProfileRepository::create(&store, &draft).await.unwrap();
        assert!(matches!(
            ProfileRepository::create(&store, &draft).await,
            Err(DomainError::ProfileAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let store = MemoryStore::new();
        for i in 0..5 {
            seed_user(&store, &format!("user{i}")).await;
        }
        let page = UserRepository::list(&store, 2, 2).await.unwrap();
        let names: Vec<_> = page.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["user2", "user3"]);
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_config_prefix_filter() {
        let store = MemoryStore::new();
        for (key, value) in [("site.title", "Hub"), ("mail.host", "smtp"), ("site.lang", "en")] {
            ConfigRepository::create(
                &store,
                &NewConfigEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                },
            )
            .await
            .unwrap();
        }
        let filter = ConfigFilter {
            key_prefix: Some("site.".to_string()),
        };
        let keys: Vec<_> = ConfigRepository::list(&store, &filter)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["site.lang", "site.title"]);
    }
}
