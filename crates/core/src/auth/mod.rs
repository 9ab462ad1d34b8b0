//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - The write-side password policy

mod password;

pub use password::{
    MIN_PASSWORD_LEN, PasswordError, PasswordTooShort, hash_password, validate_password,
    verify_password,
};
