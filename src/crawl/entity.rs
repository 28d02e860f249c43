//! Traversal nodes

use std::fmt;

/// Width of a normalized company number
pub const COMPANY_NUMBER_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Company,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Company => write!(f, "company"),
        }
    }
}

/// A node of the ownership graph, identified by kind and registry id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    pub kind: EntityKind,
    pub id: String,
}

impl Entity {
    /// A company entity; the number is normalized on construction
    pub fn company(number: &str) -> Self {
        Self {
            kind: EntityKind::Company,
            id: normalize_company_number(number),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Normalize a company number to 8 characters with leading zeros
///
/// Prefixed numbers (`SC`, `NI`, `OC`, ...) are only uppercased; the
/// registry already issues those at full width.
pub fn normalize_company_number(number: &str) -> String {
    let number = number.trim().to_uppercase();
    format!("{:0>width$}", number, width = COMPANY_NUMBER_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_company_number() {
        assert_eq!(normalize_company_number("123"), "00000123");
        assert_eq!(normalize_company_number("12345678"), "12345678");
        assert_eq!(normalize_company_number(" 1234567 "), "01234567");
        assert_eq!(normalize_company_number("sc123456"), "SC123456");
        assert_eq!(normalize_company_number("123456789"), "123456789");
    }

    #[test]
    fn test_entity_equality_uses_normalized_id() {
        assert_eq!(Entity::company("123"), Entity::company("00000123"));
        assert_eq!(Entity::company("123").to_string(), "company:00000123");
    }

    proptest! {
        #[test]
        fn normalized_numbers_are_at_least_eight_wide(digits in "[0-9]{1,8}") {
            let normalized = normalize_company_number(&digits);
            prop_assert_eq!(normalized.len(), COMPANY_NUMBER_WIDTH);
            prop_assert!(normalized.ends_with(&digits));
        }

        #[test]
        fn normalization_is_idempotent(number in "[0-9A-Za-z]{1,10}") {
            let once = normalize_company_number(&number);
            prop_assert_eq!(normalize_company_number(&once), once.clone());
        }
    }
}
