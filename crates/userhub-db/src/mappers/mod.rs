//! Entity to model mappers
//!
//! Conversions from database rows to domain entities. Rows carrying
//! integer-coded enums go through `TryFrom`, since a hand-edited row can hold
//! a code the domain does not know.

mod config_entry;
mod profile;
mod role;
mod user;
