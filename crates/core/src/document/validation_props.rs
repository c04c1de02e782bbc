//! Property-based tests for the document save pipeline.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::coding::AccountNature;

use super::entry::DocumentEntry;
use super::error::DocumentError;
use super::types::DocumentDraft;
use super::validation::validate_document;

/// Strategy for a positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn postable_entry(debit: Decimal, credit: Decimal) -> DocumentEntry {
    DocumentEntry::from_parts(
        "120304".to_string(),
        "بانک ملی".to_string(),
        String::new(),
        debit,
        credit,
        Some(AccountNature::DebitCredit),
    )
}

fn draft(entries: Vec<DocumentEntry>) -> DocumentDraft {
    DocumentDraft {
        number: "1".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        description: String::new(),
        entries,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A document whose debit and credit legs carry the same amount
    /// always saves.
    #[test]
    fn prop_balanced_pairs_accepted(amount in positive_amount()) {
        let result = validate_document(draft(vec![
            postable_entry(amount, Decimal::ZERO),
            postable_entry(Decimal::ZERO, amount),
        ]));
        prop_assert!(result.is_ok(), "got: {:?}", result);
    }

    /// Unequal totals are always rejected, whatever the blank-row count.
    #[test]
    fn prop_unbalanced_rejected(
        debit in positive_amount(),
        credit in positive_amount(),
        blanks in 0usize..5,
    ) {
        prop_assume!(debit != credit);

        let mut entries = vec![
            postable_entry(debit, Decimal::ZERO),
            postable_entry(Decimal::ZERO, credit),
        ];
        entries.extend((0..blanks).map(|_| DocumentEntry::blank()));

        let result = validate_document(draft(entries));
        prop_assert!(
            matches!(result, Err(DocumentError::Unbalanced { .. })),
            "got: {:?}",
            result
        );
    }

    /// Blank rows never change the computed totals.
    #[test]
    fn prop_blank_rows_do_not_affect_totals(
        amount in positive_amount(),
        blanks in 0usize..8,
    ) {
        let mut entries = vec![
            postable_entry(amount, Decimal::ZERO),
            postable_entry(Decimal::ZERO, amount),
        ];
        entries.extend((0..blanks).map(|_| DocumentEntry::blank()));

        let validated = validate_document(draft(entries)).unwrap();
        prop_assert_eq!(validated.entries.len(), 2);
        prop_assert_eq!(validated.totals.total_debit, amount);
        prop_assert_eq!(validated.totals.total_credit, amount);
    }

    /// Multi-leg documents balance by sum, not by pairing.
    #[test]
    fn prop_multi_leg_balanced_accepted(
        a in positive_amount(),
        b in positive_amount(),
    ) {
        let result = validate_document(draft(vec![
            postable_entry(a, Decimal::ZERO),
            postable_entry(b, Decimal::ZERO),
            postable_entry(Decimal::ZERO, a + b),
        ]));
        prop_assert!(result.is_ok(), "got: {:?}", result);
    }

    /// A debit-nature account never accepts a positive credit amount,
    /// and the rejected mutation leaves the entry unchanged.
    #[test]
    fn prop_debit_nature_mutation_is_noop(amount in positive_amount()) {
        let mut entry = DocumentEntry::from_parts(
            "120304".to_string(),
            "بانک ملی".to_string(),
            String::new(),
            Decimal::ZERO,
            Decimal::ZERO,
            Some(AccountNature::Debit),
        );

        let before = entry.credit;
        let result = entry.set_credit(amount);
        prop_assert_eq!(result, Err(DocumentError::DebitNatureViolation));
        prop_assert_eq!(entry.credit, before);
    }
}
