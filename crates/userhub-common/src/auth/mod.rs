//! Authentication utilities

mod password;
mod token;

pub use password::{hash_password, verify_password, PasswordService};
pub use token::{Claims, IssuedToken, TokenService, TOKEN_ID_BYTES};
