//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in userhub-core.
//! Each repository handles database operations for a specific domain entity.

mod config;
mod error;
mod health;
mod profile;
mod role;
mod user;

pub use config::PgConfigRepository;
pub use health::PgStoreHealth;
pub use profile::PgProfileRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
