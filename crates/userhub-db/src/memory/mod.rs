//! In-process store
//!
//! Implements every repository trait over a set of mutex-guarded tables. It
//! enforces the same unique constraints, foreign keys and cascades as the
//! PostgreSQL schema, and is selected with `DATABASE_URL=memory://`. Nothing
//! is persisted across restarts.

mod store;

pub use store::MemoryStore;
