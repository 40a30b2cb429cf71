//! Sensitive column name patterns.
//!
//! A column is interesting when its lower-cased name contains any of these
//! substrings. The catalog query in [`crate::catalog`] is generated from this
//! list; [`is_sensitive`] is the client-side equivalent of that filter.

/// Substrings that flag a column name as potentially holding sensitive data.
pub const SENSITIVE_PATTERNS: [&str; 8] = [
    "pass", "ssn", "routing", "rtn", "address", "credit", "card", "cvv",
];

/// Whether a column name matches any sensitive pattern, case-insensitively.
///
/// A column matching several patterns is still a single match; the server-side
/// filter OR-joins the same patterns and returns one row per column.
#[must_use]
pub fn is_sensitive(column_name: &str) -> bool {
    let lower = column_name.to_lowercase();
    SENSITIVE_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_variants_match() {
        assert!(is_sensitive("Password"));
        assert!(is_sensitive("password_hash"));
        assert!(is_sensitive("PASSWD"));
        assert!(is_sensitive("user_passphrase"));
    }

    #[test]
    fn test_financial_columns_match() {
        assert!(is_sensitive("CreditCardNumber"));
        assert!(is_sensitive("cvv2"));
        assert!(is_sensitive("RoutingNumber"));
        assert!(is_sensitive("ach_rtn"));
    }

    #[test]
    fn test_identity_columns_match() {
        assert!(is_sensitive("SSN"));
        assert!(is_sensitive("customer_ssn"));
        assert!(is_sensitive("HomeAddress"));
    }

    #[test]
    fn test_boring_columns_do_not_match() {
        assert!(!is_sensitive("id"));
        assert!(!is_sensitive("created_at"));
        assert!(!is_sensitive("order_total"));
        assert!(!is_sensitive(""));
    }

    #[test]
    fn test_multi_pattern_column_is_one_match() {
        // "card" and "credit" both hit; still a single boolean answer
        assert!(is_sensitive("credit_card"));
    }
}
