//! Save-time validation pipeline and status guards.
//!
//! The pipeline runs strictly in order and short-circuits on the first
//! failure: header fields, any entry at all, any postable entry, then
//! blank rows are dropped, totals computed, and exact balance required.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::entry::DocumentEntry;
use super::error::DocumentError;
use super::types::{DocumentDraft, DocumentStatus, DocumentTotals};

/// A draft that passed the save pipeline: blank rows dropped, totals
/// computed and balanced.
#[derive(Debug, Clone)]
pub struct ValidatedDocument {
    /// User-entered document number.
    pub number: String,
    /// Document date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Postable entries only.
    pub entries: Vec<DocumentEntry>,
    /// Balanced totals.
    pub totals: DocumentTotals,
}

/// Runs the ordered save pipeline over a draft.
///
/// # Errors
///
/// Returns the first failing check, in pipeline order:
/// `MissingHeaderFields`, `NoEntries`, `NoPostableEntries`, `Unbalanced`.
pub fn validate_document(draft: DocumentDraft) -> Result<ValidatedDocument, DocumentError> {
    // 1. Header fields.
    let number = draft.number.trim();
    let Some(date) = draft.date else {
        return Err(DocumentError::MissingHeaderFields);
    };
    if number.is_empty() {
        return Err(DocumentError::MissingHeaderFields);
    }

    // 2. At least one entry row.
    if draft.entries.is_empty() {
        return Err(DocumentError::NoEntries);
    }

    // 3. At least one postable row.
    if !draft.entries.iter().any(DocumentEntry::is_postable) {
        return Err(DocumentError::NoPostableEntries);
    }

    // 4. Drop blank placeholder rows.
    let entries: Vec<DocumentEntry> = draft
        .entries
        .into_iter()
        .filter(DocumentEntry::is_postable)
        .collect();

    // 5-6. Totals over the filtered set; exact equality, no epsilon.
    let totals = calculate_totals(&entries);
    if !totals.is_balanced {
        return Err(DocumentError::Unbalanced {
            debit: totals.total_debit,
            credit: totals.total_credit,
        });
    }

    // 7. Hand off; the caller chooses the persisted status explicitly.
    Ok(ValidatedDocument {
        number: number.to_string(),
        date,
        description: draft.description,
        entries,
        totals,
    })
}

/// Calculates debit/credit totals over a set of entries.
#[must_use]
pub fn calculate_totals(entries: &[DocumentEntry]) -> DocumentTotals {
    let total_debit: Decimal = entries.iter().map(|e| e.debit).sum();
    let total_credit: Decimal = entries.iter().map(|e| e.credit).sum();
    DocumentTotals::new(total_debit, total_credit)
}

/// Validates that a document can be modified.
///
/// # Errors
///
/// Returns `DocumentLocked` for permanent documents.
pub fn validate_can_modify(status: DocumentStatus) -> Result<(), DocumentError> {
    if status.is_locked() {
        return Err(DocumentError::DocumentLocked);
    }
    Ok(())
}

/// Validates that a document can be deleted.
///
/// # Errors
///
/// Returns `CanOnlyDeleteTemporary` unless the document is temporary.
pub fn validate_can_delete(status: DocumentStatus) -> Result<(), DocumentError> {
    if status != DocumentStatus::Temporary {
        return Err(DocumentError::CanOnlyDeleteTemporary);
    }
    Ok(())
}

/// Validates an explicit status change request.
///
/// The only transitions are temporary -> permanent and the explicit
/// revert permanent -> temporary. Re-asserting the current status is not
/// a silent no-op; it is rejected.
pub fn validate_status_change(
    from: DocumentStatus,
    to: DocumentStatus,
) -> Result<(), DocumentError> {
    if from == to {
        return Err(DocumentError::InvalidStatusTransition { from, to });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::AccountNature;
    use rust_decimal_macros::dec;

    fn entry(code: &str, debit: Decimal, credit: Decimal) -> DocumentEntry {
        DocumentEntry::from_parts(
            code.to_string(),
            format!("حساب {code}"),
            String::new(),
            debit,
            credit,
            Some(AccountNature::DebitCredit),
        )
    }

    fn draft(entries: Vec<DocumentEntry>) -> DocumentDraft {
        DocumentDraft {
            number: "140305-001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1),
            description: "سند افتتاحیه".to_string(),
            entries,
        }
    }

    #[test]
    fn test_balanced_document_passes() {
        let result = validate_document(draft(vec![
            entry("120304", dec!(1000), Decimal::ZERO),
            entry("210101", Decimal::ZERO, dec!(1000)),
        ]));

        let validated = result.unwrap();
        assert_eq!(validated.entries.len(), 2);
        assert!(validated.totals.is_balanced);
        assert_eq!(validated.totals.total_debit, dec!(1000));
    }

    #[test]
    fn test_unbalanced_document_rejected() {
        let result = validate_document(draft(vec![
            entry("120304", dec!(1000), Decimal::ZERO),
            entry("210101", Decimal::ZERO, dec!(900)),
        ]));

        assert_eq!(
            result.unwrap_err(),
            DocumentError::Unbalanced {
                debit: dec!(1000),
                credit: dec!(900),
            }
        );
    }

    #[test]
    fn test_missing_number_rejected() {
        let mut d = draft(vec![entry("120304", dec!(1), Decimal::ZERO)]);
        d.number = "   ".to_string();
        assert_eq!(
            validate_document(d).unwrap_err(),
            DocumentError::MissingHeaderFields
        );
    }

    #[test]
    fn test_missing_date_rejected() {
        let mut d = draft(vec![entry("120304", dec!(1), Decimal::ZERO)]);
        d.date = None;
        assert_eq!(
            validate_document(d).unwrap_err(),
            DocumentError::MissingHeaderFields
        );
    }

    #[test]
    fn test_empty_entries_rejected() {
        assert_eq!(
            validate_document(draft(vec![])).unwrap_err(),
            DocumentError::NoEntries
        );
    }

    #[test]
    fn test_only_blank_rows_rejected() {
        let result = validate_document(draft(vec![
            DocumentEntry::blank(),
            DocumentEntry::blank(),
        ]));
        assert_eq!(result.unwrap_err(), DocumentError::NoPostableEntries);
    }

    #[test]
    fn test_blank_rows_dropped_before_balancing() {
        // Blank rows between postable ones neither block the save nor
        // contribute to the totals.
        let result = validate_document(draft(vec![
            entry("120304", dec!(500), Decimal::ZERO),
            DocumentEntry::blank(),
            entry("210101", Decimal::ZERO, dec!(500)),
            DocumentEntry::blank(),
        ]));

        let validated = result.unwrap();
        assert_eq!(validated.entries.len(), 2);
        assert!(validated.totals.is_balanced);
    }

    #[test]
    fn test_header_checked_before_entries() {
        // Pipeline order: an empty number fails even when entries are
        // also missing.
        let d = DocumentDraft {
            number: String::new(),
            date: None,
            description: String::new(),
            entries: vec![],
        };
        assert_eq!(
            validate_document(d).unwrap_err(),
            DocumentError::MissingHeaderFields
        );
    }

    #[test]
    fn test_can_modify() {
        assert!(validate_can_modify(DocumentStatus::Temporary).is_ok());
        assert_eq!(
            validate_can_modify(DocumentStatus::Permanent).unwrap_err(),
            DocumentError::DocumentLocked
        );
    }

    #[test]
    fn test_can_delete() {
        assert!(validate_can_delete(DocumentStatus::Temporary).is_ok());
        assert_eq!(
            validate_can_delete(DocumentStatus::Permanent).unwrap_err(),
            DocumentError::CanOnlyDeleteTemporary
        );
    }

    #[test]
    fn test_status_change_rules() {
        assert!(
            validate_status_change(DocumentStatus::Temporary, DocumentStatus::Permanent).is_ok()
        );
        assert!(
            validate_status_change(DocumentStatus::Permanent, DocumentStatus::Temporary).is_ok()
        );
        assert_eq!(
            validate_status_change(DocumentStatus::Temporary, DocumentStatus::Temporary)
                .unwrap_err(),
            DocumentError::InvalidStatusTransition {
                from: DocumentStatus::Temporary,
                to: DocumentStatus::Temporary,
            }
        );
    }
}
