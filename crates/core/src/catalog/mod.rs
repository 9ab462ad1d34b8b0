//! Book catalog field rules.

pub mod rules;

#[cfg(test)]
mod rules_props;

pub use rules::{
    CatalogRuleViolation, MAX_AUTHOR_LEN, MAX_DAILY_FEE, MAX_TITLE_LEN, validate_book_fields,
};
