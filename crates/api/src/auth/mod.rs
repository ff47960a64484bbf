//! Authentication primitives: JWT access tokens, opaque refresh/reset
//! tokens, and Argon2id password hashing.

pub mod jwt;
pub mod password;
