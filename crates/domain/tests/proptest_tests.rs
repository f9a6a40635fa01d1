//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{CityName, Condition, Humidity};
use proptest::prelude::*;

// ============================================================================
// Condition Property Tests
// ============================================================================

mod condition_tests {
    use super::*;

    proptest! {
        #[test]
        fn unlisted_categories_are_unknown(raw in "[a-zA-Z ]{0,16}") {
            let canonical = Condition::canonicalize(&raw);
            let listed = Condition::KNOWN.iter().any(|c| c.as_str() == canonical);
            prop_assume!(!listed);
            prop_assert_eq!(Condition::parse(&raw), Condition::Unknown);
        }

        #[test]
        fn parse_ignores_letter_case(index in 0usize..8, flips in proptest::collection::vec(any::<bool>(), 12)) {
            let condition = Condition::KNOWN[index];
            let mangled: String = condition
                .as_str()
                .chars()
                .zip(flips.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect();
            prop_assert_eq!(Condition::parse(&mangled), condition);
        }

        #[test]
        fn canonicalize_is_idempotent(raw in "[a-zA-Z ]{0,20}") {
            let once = Condition::canonicalize(&raw);
            prop_assert_eq!(Condition::canonicalize(&once), once.clone());
        }
    }
}

// ============================================================================
// CityName Property Tests
// ============================================================================

mod city_name_tests {
    use super::*;

    proptest! {
        #[test]
        fn city_names_are_trimmed(name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]", pad in " {0,4}") {
            let padded = format!("{pad}{name}{pad}");
            let city = CityName::new(padded).unwrap();
            prop_assert_eq!(city.as_str(), name.as_str());
        }

        #[test]
        fn blank_names_rejected(blank in "[ \\t]{0,10}") {
            prop_assert!(CityName::new(blank).is_err());
        }
    }
}

// ============================================================================
// Humidity Property Tests
// ============================================================================

mod humidity_tests {
    use super::*;

    proptest! {
        #[test]
        fn readings_always_in_range(value in proptest::num::f64::ANY) {
            let h = Humidity::from_reading(value);
            prop_assert!(h.value() <= Humidity::MAX);
        }

        #[test]
        fn valid_values_accepted(value in 0u8..=100) {
            prop_assert_eq!(Humidity::new(value).unwrap().value(), value);
        }

        #[test]
        fn invalid_values_rejected(value in 101u8..=255) {
            prop_assert!(Humidity::new(value).is_err());
        }
    }
}
