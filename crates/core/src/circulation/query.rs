//! Query-filter parsing for the borrowing list view.

/// Parses the tri-state `is_active` query parameter.
///
/// Absent means no filter. A present value selects ACTIVE borrowings when it
/// is one of `true`, `t`, or `1` (case-insensitive), and RETURNED borrowings
/// for any other value.
#[must_use]
pub fn parse_is_active(raw: Option<&str>) -> Option<bool> {
    raw.map(|value| matches!(value.to_lowercase().as_str(), "true" | "t" | "1"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::parse_is_active;

    #[test]
    fn absent_means_no_filter() {
        assert_eq!(parse_is_active(None), None);
    }

    #[rstest]
    #[case("true")]
    #[case("True")]
    #[case("TRUE")]
    #[case("t")]
    #[case("1")]
    fn truthy_values_select_active(#[case] raw: &str) {
        assert_eq!(parse_is_active(Some(raw)), Some(true));
    }

    #[rstest]
    #[case("false")]
    #[case("f")]
    #[case("0")]
    #[case("no")]
    #[case("")]
    fn other_values_select_returned(#[case] raw: &str) {
        assert_eq!(parse_is_active(Some(raw)), Some(false));
    }
}
