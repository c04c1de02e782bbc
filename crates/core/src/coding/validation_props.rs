//! Property-based tests for code segment validation and composition.

use proptest::prelude::*;

use super::error::CodingError;
use super::tree::CodingTree;
use super::types::{AccountNature, CodingLevel};
use super::validation::{next_segment, validate_segment};

/// Strategy for a valid single-digit segment (1-9).
fn one_digit_segment() -> impl Strategy<Value = String> {
    (1u32..=9).prop_map(|v| v.to_string())
}

/// Strategy for a valid two-digit segment (01-99).
fn two_digit_segment() -> impl Strategy<Value = String> {
    (1u32..=99).prop_map(|v| format!("{v:02}"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Group and class codes accept exactly the single digits 1-9.
    #[test]
    fn prop_one_digit_segments_accepted(code in one_digit_segment()) {
        prop_assert!(validate_segment(CodingLevel::Group, &code).is_ok());
        prop_assert!(validate_segment(CodingLevel::Class, &code).is_ok());
    }

    /// Any string that is not a single digit 1-9 is rejected as a group code.
    #[test]
    fn prop_group_rejects_everything_else(code in "\\PC*") {
        let accepted = code.len() == 1
            && code.as_bytes()[0].is_ascii_digit()
            && code != "0";
        prop_assert_eq!(
            validate_segment(CodingLevel::Group, &code).is_ok(),
            accepted,
            "code: {:?}",
            code
        );
    }

    /// Subclass and detail codes accept exactly the two-digit range 01-99.
    #[test]
    fn prop_two_digit_segments_accepted(code in two_digit_segment()) {
        prop_assert!(validate_segment(CodingLevel::SubClass, &code).is_ok());
        prop_assert!(validate_segment(CodingLevel::Detail, &code).is_ok());
    }

    /// Any string that is not two digits in 01-99 is rejected as a detail code.
    #[test]
    fn prop_detail_rejects_everything_else(code in "\\PC*") {
        let accepted = code.len() == 2
            && code.bytes().all(|b| b.is_ascii_digit())
            && code != "00";
        prop_assert_eq!(
            validate_segment(CodingLevel::Detail, &code).is_ok(),
            accepted,
            "code: {:?}",
            code
        );
    }

    /// Full codes compose left-to-right: group + class + subclass + detail.
    #[test]
    fn prop_full_code_is_concatenation(
        g in one_digit_segment(),
        c in one_digit_segment(),
        s in two_digit_segment(),
        d in two_digit_segment(),
    ) {
        let mut tree = CodingTree::new();
        let group = tree.add_group(&g, "group").unwrap();
        let class = tree.add_class(group, &c, "class", AccountNature::DebitCredit).unwrap();
        let subclass = tree.add_subclass(class, &s, "subclass", true).unwrap();
        let detail = tree.add_detail(subclass, &d, "detail", None).unwrap();

        prop_assert_eq!(
            tree.detail_full_code(detail).unwrap(),
            format!("{g}{c}{s}{d}")
        );
    }

    /// A second sibling with the same segment is always rejected.
    #[test]
    fn prop_sibling_duplicates_rejected(code in one_digit_segment()) {
        let mut tree = CodingTree::new();
        tree.add_group(&code, "first").unwrap();
        prop_assert!(
            matches!(
                tree.add_group(&code, "second"),
                Err(CodingError::DuplicateSiblingCode { .. })
            ),
            "expected DuplicateSiblingCode for code {:?}",
            code
        );
    }

    /// The next-code suggestion is always a valid segment for its level.
    #[test]
    fn prop_next_segment_is_valid(
        siblings in prop::collection::vec(two_digit_segment(), 0..20),
    ) {
        let suggestion = next_segment(
            CodingLevel::Detail,
            siblings.iter().map(String::as_str),
        );
        prop_assert!(validate_segment(CodingLevel::Detail, &suggestion).is_ok());
    }

    /// Below the cap, the suggestion is exactly max(siblings) + 1.
    #[test]
    fn prop_next_segment_increments(max in 1u32..99) {
        let siblings: Vec<String> = (1..=max).map(|v| format!("{v:02}")).collect();
        let suggestion = next_segment(
            CodingLevel::Detail,
            siblings.iter().map(String::as_str),
        );
        prop_assert_eq!(suggestion, format!("{:02}", max + 1));
    }
}
