//! # userhub-db
//!
//! Persistence layer implementing the repository traits of `userhub-core`.
//!
//! ## Overview
//!
//! Two backends are provided:
//!
//! - PostgreSQL via SQLx: connection pool, idempotent schema, `FromRow`
//!   models, model -> entity mappers and one repository per entity.
//! - [`MemoryStore`]: an in-process store with the same constraints, used
//!   for local development and tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use userhub_db::{apply_schema, create_pool, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     apply_schema(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{apply_schema, create_pool, DatabaseConfig, PgPool};
pub use repositories::{
    PgConfigRepository, PgProfileRepository, PgRoleRepository, PgStoreHealth, PgUserRepository,
};
