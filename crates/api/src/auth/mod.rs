//! Authentication building blocks: JWT access tokens, hashed refresh
//! tokens, and argon2 password handling.

pub mod jwt;
pub mod password;
