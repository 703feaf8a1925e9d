//! # userhub-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ConfigEntry, ConfigFilter, NewConfigEntry, NewProfile, NewRole, NewUser, Profile, Role, User,
    UserRole, ADMIN_ROLE_NAME, DEFAULT_ROLE_NAME,
};
pub use error::DomainError;
pub use traits::{
    ConfigRepository, ProfileRepository, RepoResult, RoleRepository, StoreHealth, UserRepository,
};
pub use value_objects::{Gender, RecordId, RecordIdParseError, UserStatus};
