//! Property-based tests for catalog field rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::rules::{CatalogRuleViolation, MAX_DAILY_FEE, validate_book_fields};

/// Strategy for a fee inside the NUMERIC(5,2) range.
fn valid_fee() -> impl Strategy<Value = Decimal> {
    (0i64..=99_999i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a negative fee with two decimal places.
fn negative_fee() -> impl Strategy<Value = Decimal> {
    (1i64..=99_999i64).prop_map(|cents| Decimal::new(-cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any in-range fee with non-negative inventory is accepted.
    #[test]
    fn prop_in_range_fee_accepted(
        fee in valid_fee(),
        inventory in 0i32..10_000,
    ) {
        prop_assert!(validate_book_fields("Title", "Author", inventory, fee).is_ok());
    }

    /// Any negative fee is rejected and attributed to daily_fee.
    #[test]
    fn prop_negative_fee_rejected(fee in negative_fee()) {
        let violations = validate_book_fields("Title", "Author", 1, fee).unwrap_err();
        prop_assert_eq!(violations, vec![CatalogRuleViolation::NegativeDailyFee]);
        prop_assert_eq!(violations[0].field(), "daily_fee");
    }

    /// Any fee above the range cap is rejected.
    #[test]
    fn prop_fee_above_cap_rejected(excess in 1i64..1_000_000) {
        let fee = MAX_DAILY_FEE + Decimal::new(excess, 2);
        let violations = validate_book_fields("Title", "Author", 1, fee).unwrap_err();
        prop_assert!(violations.contains(&CatalogRuleViolation::DailyFeeTooLarge));
    }

    /// Any negative inventory is rejected and attributed to inventory.
    #[test]
    fn prop_negative_inventory_rejected(inventory in i32::MIN..0) {
        let violations =
            validate_book_fields("Title", "Author", inventory, Decimal::ONE).unwrap_err();
        prop_assert_eq!(violations, vec![CatalogRuleViolation::NegativeInventory]);
        prop_assert_eq!(violations[0].field(), "inventory");
    }
}
