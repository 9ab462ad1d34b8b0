//! Shared configuration and auth types for Shelfmark.
//!
//! This crate provides the pieces every other crate leans on:
//! - Configuration management (files + environment)
//! - JWT token service and claims
//! - Request/response payloads for the auth endpoints

pub mod auth;
pub mod config;
pub mod jwt;

mod auth_tests;

pub use auth::{Claims, TokenPair};
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
