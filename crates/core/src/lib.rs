//! Core business logic for Shelfmark.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain rules, validation, and capability checks live here.
//!
//! # Modules
//!
//! - `circulation` - Borrowing date rules and query-filter parsing
//! - `catalog` - Book field validation rules
//! - `policy` - Caller capability checks and visibility scoping
//! - `clock` - Injected date capability
//! - `auth` - Password hashing and password policy

pub mod auth;
pub mod catalog;
pub mod circulation;
pub mod clock;
pub mod policy;
