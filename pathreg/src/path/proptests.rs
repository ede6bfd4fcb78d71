//! Property-based tests for fragment syntax and relative resolution.
//!
//! The normalize module already has property tests for normalization.
//! This module focuses on fragment conversion and joining.

use super::resolver::{resolve_absolute, resolve_relative};
use super::syntax::{convert_fragment, join};
use proptest::prelude::*;

fn component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_.-]{1,12}".prop_filter("dot components", |s| s != "." && s != "..")
}

fn fragment_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(component_strategy(), 1..5).prop_map(|parts| parts.join("/"))
}

fn absolute_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(component_strategy(), 1..6)
        .prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A leading slash never changes the result of a relative resolution
    #[test]
    fn leading_slash_is_ignored(base in absolute_strategy(), fragment in fragment_strategy()) {
        let plain = resolve_relative(&base, &fragment).unwrap();
        let slashed = resolve_relative(&base, &format!("/{fragment}")).unwrap();
        prop_assert_eq!(plain, slashed);
    }

    // Relative resolution always starts with the base
    #[test]
    fn relative_result_extends_base(base in absolute_strategy(), fragment in fragment_strategy()) {
        let resolved = resolve_relative(&base, &fragment).unwrap();
        prop_assert!(resolved.starts_with(&base));
        prop_assert!(resolved.len() > base.len());
    }

    // Joining never produces a doubled separator at the seam
    #[test]
    fn join_has_no_double_separator(base in absolute_strategy(), fragment in fragment_strategy()) {
        let with_trailing = format!("{base}/");
        let converted = convert_fragment(&fragment).unwrap();
        let joined = join(&with_trailing, converted.as_deref());
        prop_assert!(!joined.contains("//"));
    }

    // Absolute resolution of an already-normal path is the identity
    #[test]
    fn absolute_resolution_identity(path in absolute_strategy()) {
        prop_assert_eq!(resolve_absolute(&path).unwrap(), path);
    }
}
