//! Borrowing lifecycle rules.
//!
//! This module implements the pure rules of the borrowing lifecycle:
//! - Date ordering between borrow, expected return, and actual return
//! - Tri-state parsing of the `is_active` query filter

pub mod dates;
pub mod query;

#[cfg(test)]
mod dates_props;

pub use dates::{DateRuleViolation, validate_borrowing_dates};
pub use query::parse_is_active;
