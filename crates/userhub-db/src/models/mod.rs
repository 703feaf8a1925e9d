//! Database models - SQLx-compatible structs for PostgreSQL tables

mod config_entry;
mod profile;
mod role;
mod user;

pub use config_entry::ConfigEntryModel;
pub use profile::ProfileModel;
pub use role::RoleModel;
pub use user::UserModel;
