//! Ports implemented by the persistence layer

mod repositories;

pub use repositories::{
    ConfigRepository, ProfileRepository, RepoResult, RoleRepository, StoreHealth, UserRepository,
};
