//! Authentication primitives: password hashing and bearer tokens

pub mod jwt;
pub mod password;

pub use jwt::{decode_token, issue_token, Claims};
pub use password::{hash_password, verify_password};
