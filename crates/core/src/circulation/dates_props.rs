//! Property-based tests for borrowing date rules.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::dates::{DateRuleViolation, validate_borrowing_dates};

prop_compose! {
    /// Strategy for an arbitrary date within a few decades of the epoch.
    fn any_date()(days in -10_000i64..10_000i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(days)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any expected return date on or after the borrow date is accepted.
    #[test]
    fn prop_expected_on_or_after_borrow_accepted(
        borrow in any_date(),
        offset in 0i64..3650,
    ) {
        let expected = borrow + Duration::days(offset);
        prop_assert!(validate_borrowing_dates(borrow, Some(expected), None).is_ok());
    }

    /// Any expected return date strictly before the borrow date is rejected
    /// and attributed to the expected_return_date field.
    #[test]
    fn prop_expected_before_borrow_rejected(
        borrow in any_date(),
        offset in 1i64..3650,
    ) {
        let expected = borrow - Duration::days(offset);
        let violations = validate_borrowing_dates(borrow, Some(expected), None).unwrap_err();
        prop_assert_eq!(violations.len(), 1);
        prop_assert_eq!(violations[0], DateRuleViolation::ExpectedBeforeBorrow);
        prop_assert_eq!(violations[0].field(), "expected_return_date");
    }

    /// Any actual return date strictly before the borrow date is rejected
    /// and attributed to the actual_return_date field.
    #[test]
    fn prop_actual_before_borrow_rejected(
        borrow in any_date(),
        offset in 1i64..3650,
    ) {
        let actual = borrow - Duration::days(offset);
        let violations = validate_borrowing_dates(borrow, None, Some(actual)).unwrap_err();
        prop_assert_eq!(violations.len(), 1);
        prop_assert_eq!(violations[0], DateRuleViolation::ActualBeforeBorrow);
        prop_assert_eq!(violations[0].field(), "actual_return_date");
    }

    /// The two rules never mask each other: the outcome for a pair of
    /// candidate dates is exactly the union of the per-field outcomes.
    #[test]
    fn prop_rules_fire_independently(
        borrow in any_date(),
        expected_offset in -3650i64..3650,
        actual_offset in -3650i64..3650,
    ) {
        let expected = borrow + Duration::days(expected_offset);
        let actual = borrow + Duration::days(actual_offset);

        let result = validate_borrowing_dates(borrow, Some(expected), Some(actual));

        let mut wanted = Vec::new();
        if expected_offset < 0 {
            wanted.push(DateRuleViolation::ExpectedBeforeBorrow);
        }
        if actual_offset < 0 {
            wanted.push(DateRuleViolation::ActualBeforeBorrow);
        }

        match result {
            Ok(()) => prop_assert!(wanted.is_empty()),
            Err(violations) => prop_assert_eq!(violations, wanted),
        }
    }
}
