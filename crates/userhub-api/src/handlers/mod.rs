//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod configs;
pub mod health;
pub mod roles;
pub mod users;
