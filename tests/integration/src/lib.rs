//! Integration test utilities for userhub
//!
//! Spawns the full HTTP application on a loopback port and drives it with
//! a real HTTP client.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
