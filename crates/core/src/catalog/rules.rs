//! Validation rules for book catalog writes.

use rust_decimal::Decimal;
use thiserror::Error;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 255;
/// Maximum author length in characters.
pub const MAX_AUTHOR_LEN: usize = 150;
/// Largest representable daily fee (NUMERIC(5,2) upper bound).
pub const MAX_DAILY_FEE: Decimal = Decimal::from_parts(99_999, 0, 0, false, 2);

/// A violated catalog rule, attributed to the field that carries it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRuleViolation {
    /// Title is blank.
    #[error("Title must not be blank.")]
    TitleBlank,

    /// Title exceeds the maximum length.
    #[error("Title must be at most 255 characters.")]
    TitleTooLong,

    /// Author is blank.
    #[error("Author must not be blank.")]
    AuthorBlank,

    /// Author exceeds the maximum length.
    #[error("Author must be at most 150 characters.")]
    AuthorTooLong,

    /// Inventory is negative.
    #[error("Inventory must not be negative.")]
    NegativeInventory,

    /// Daily fee is negative.
    #[error("Daily fee must not be negative.")]
    NegativeDailyFee,

    /// Daily fee exceeds the NUMERIC(5,2) range.
    #[error("Daily fee must not exceed 999.99.")]
    DailyFeeTooLarge,

    /// Daily fee has more than two decimal places.
    #[error("Daily fee must have at most two decimal places.")]
    DailyFeePrecision,
}

impl CatalogRuleViolation {
    /// Returns the name of the field the violation is attributed to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::TitleBlank | Self::TitleTooLong => "title",
            Self::AuthorBlank | Self::AuthorTooLong => "author",
            Self::NegativeInventory => "inventory",
            Self::NegativeDailyFee | Self::DailyFeeTooLarge | Self::DailyFeePrecision => {
                "daily_fee"
            }
        }
    }
}

/// Checks all field rules for a book write.
///
/// Every violated rule is reported, in field order.
///
/// # Errors
///
/// Returns the list of violated rules.
pub fn validate_book_fields(
    title: &str,
    author: &str,
    inventory: i32,
    daily_fee: Decimal,
) -> Result<(), Vec<CatalogRuleViolation>> {
    let mut violations = Vec::new();

    if title.trim().is_empty() {
        violations.push(CatalogRuleViolation::TitleBlank);
    } else if title.chars().count() > MAX_TITLE_LEN {
        violations.push(CatalogRuleViolation::TitleTooLong);
    }

    if author.trim().is_empty() {
        violations.push(CatalogRuleViolation::AuthorBlank);
    } else if author.chars().count() > MAX_AUTHOR_LEN {
        violations.push(CatalogRuleViolation::AuthorTooLong);
    }

    if inventory < 0 {
        violations.push(CatalogRuleViolation::NegativeInventory);
    }

    if daily_fee < Decimal::ZERO {
        violations.push(CatalogRuleViolation::NegativeDailyFee);
    } else if daily_fee > MAX_DAILY_FEE {
        violations.push(CatalogRuleViolation::DailyFeeTooLarge);
    }

    if daily_fee.scale() > 2 {
        violations.push(CatalogRuleViolation::DailyFeePrecision);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_valid_fields_pass() {
        assert!(validate_book_fields("Dune", "Frank Herbert", 5, dec!(10.00)).is_ok());
    }

    #[test]
    fn test_zero_fee_and_zero_inventory_pass() {
        assert!(validate_book_fields("Dune", "Frank Herbert", 0, dec!(0.00)).is_ok());
    }

    #[test]
    fn test_max_fee_passes() {
        assert!(validate_book_fields("Dune", "Frank Herbert", 1, dec!(999.99)).is_ok());
        assert_eq!(MAX_DAILY_FEE, dec!(999.99));
    }

    #[test]
    fn test_blank_title_rejected() {
        let violations = validate_book_fields("  ", "Author", 1, dec!(1.00)).unwrap_err();
        assert_eq!(violations, vec![CatalogRuleViolation::TitleBlank]);
        assert_eq!(violations[0].field(), "title");
    }

    #[test]
    fn test_overlong_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        let violations = validate_book_fields(&title, "Author", 1, dec!(1.00)).unwrap_err();
        assert_eq!(violations, vec![CatalogRuleViolation::TitleTooLong]);
    }

    #[test]
    fn test_overlong_author_rejected() {
        let author = "y".repeat(MAX_AUTHOR_LEN + 1);
        let violations = validate_book_fields("Title", &author, 1, dec!(1.00)).unwrap_err();
        assert_eq!(violations, vec![CatalogRuleViolation::AuthorTooLong]);
        assert_eq!(violations[0].field(), "author");
    }

    #[test]
    fn test_negative_inventory_rejected() {
        let violations = validate_book_fields("Title", "Author", -1, dec!(1.00)).unwrap_err();
        assert_eq!(violations, vec![CatalogRuleViolation::NegativeInventory]);
        assert_eq!(violations[0].field(), "inventory");
    }

    #[test]
    fn test_negative_fee_rejected() {
        let violations = validate_book_fields("Title", "Author", 1, dec!(-0.01)).unwrap_err();
        assert_eq!(violations, vec![CatalogRuleViolation::NegativeDailyFee]);
        assert_eq!(violations[0].field(), "daily_fee");
    }

    #[test]
    fn test_fee_above_range_rejected() {
        let violations = validate_book_fields("Title", "Author", 1, dec!(1000.00)).unwrap_err();
        assert_eq!(violations, vec![CatalogRuleViolation::DailyFeeTooLarge]);
    }

    #[test]
    fn test_fee_with_three_decimals_rejected() {
        let violations = validate_book_fields("Title", "Author", 1, dec!(9.999)).unwrap_err();
        assert_eq!(violations, vec![CatalogRuleViolation::DailyFeePrecision]);
    }

    #[test]
    fn test_multiple_violations_reported_together() {
        let violations = validate_book_fields("", "", -2, dec!(-1.123)).unwrap_err();
        assert_eq!(
            violations,
            vec![
                CatalogRuleViolation::TitleBlank,
                CatalogRuleViolation::AuthorBlank,
                CatalogRuleViolation::NegativeInventory,
                CatalogRuleViolation::NegativeDailyFee,
                CatalogRuleViolation::DailyFeePrecision,
            ]
        );
    }
}
