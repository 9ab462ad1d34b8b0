//! Date ordering rules for borrowings.

use chrono::NaiveDate;
use thiserror::Error;

/// A violated date rule, attributed to the field that carries it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DateRuleViolation {
    /// Expected return date precedes the borrow date.
    #[error("Expected return date must be after the borrow date.")]
    ExpectedBeforeBorrow,

    /// Actual return date precedes the borrow date.
    #[error("Actual return date must be after the borrow date.")]
    ActualBeforeBorrow,
}

impl DateRuleViolation {
    /// Returns the name of the field the violation is attributed to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ExpectedBeforeBorrow => "expected_return_date",
            Self::ActualBeforeBorrow => "actual_return_date",
        }
    }
}

/// Checks the date ordering rules of a borrowing.
///
/// Both rules are checked independently and every violated one is reported:
/// the expected return date may not precede the borrow date, and the actual
/// return date, when present, may not precede the borrow date. Callers
/// translate the violation list into their own error representation.
///
/// # Errors
///
/// Returns the list of violated rules, in field order.
pub fn validate_borrowing_dates(
    borrow_date: NaiveDate,
    expected_return_date: Option<NaiveDate>,
    actual_return_date: Option<NaiveDate>,
) -> Result<(), Vec<DateRuleViolation>> {
    let mut violations = Vec::new();

    if let Some(expected) = expected_return_date {
        if expected < borrow_date {
            violations.push(DateRuleViolation::ExpectedBeforeBorrow);
        }
    }

    if let Some(actual) = actual_return_date {
        if actual < borrow_date {
            violations.push(DateRuleViolation::ActualBeforeBorrow);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expected_on_borrow_date_is_valid() {
        let today = date(2026, 8, 20);
        assert!(validate_borrowing_dates(today, Some(today), None).is_ok());
    }

    #[test]
    fn test_expected_after_borrow_date_is_valid() {
        let today = date(2026, 8, 20);
        let next_week = date(2026, 8, 27);
        assert!(validate_borrowing_dates(today, Some(next_week), None).is_ok());
    }

    #[test]
    fn test_expected_before_borrow_date_is_rejected() {
        let today = date(2026, 8, 20);
        let yesterday = date(2026, 8, 19);

        let violations = validate_borrowing_dates(today, Some(yesterday), None).unwrap_err();
        assert_eq!(violations, vec![DateRuleViolation::ExpectedBeforeBorrow]);
        assert_eq!(violations[0].field(), "expected_return_date");
    }

    #[test]
    fn test_actual_before_borrow_date_is_rejected() {
        let borrow = date(2026, 8, 20);
        let earlier = date(2026, 8, 1);

        let violations = validate_borrowing_dates(borrow, None, Some(earlier)).unwrap_err();
        assert_eq!(violations, vec![DateRuleViolation::ActualBeforeBorrow]);
        assert_eq!(violations[0].field(), "actual_return_date");
    }

    #[test]
    fn test_both_rules_fire_independently() {
        let borrow = date(2026, 8, 20);
        let earlier = date(2026, 8, 10);

        let violations =
            validate_borrowing_dates(borrow, Some(earlier), Some(earlier)).unwrap_err();
        assert_eq!(
            violations,
            vec![
                DateRuleViolation::ExpectedBeforeBorrow,
                DateRuleViolation::ActualBeforeBorrow,
            ]
        );
    }

    #[test]
    fn test_absent_dates_pass() {
        let borrow = date(2026, 8, 20);
        assert!(validate_borrowing_dates(borrow, None, None).is_ok());
    }

    #[test]
    fn test_messages_name_the_rule() {
        assert_eq!(
            DateRuleViolation::ExpectedBeforeBorrow.to_string(),
            "Expected return date must be after the borrow date."
        );
        assert_eq!(
            DateRuleViolation::ActualBeforeBorrow.to_string(),
            "Actual return date must be after the borrow date."
        );
    }
}
