//! Domain entities - core business objects

mod config_entry;
mod profile;
mod role;
mod user;

pub use config_entry::{ConfigEntry, ConfigFilter, NewConfigEntry};
pub use profile::{NewProfile, Profile};
pub use role::{NewRole, Role, UserRole, ADMIN_ROLE_NAME, DEFAULT_ROLE_NAME};
pub use user::{NewUser, User};
