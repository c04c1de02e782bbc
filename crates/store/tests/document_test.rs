//! Integration tests for the document store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use daftar_core::coding::AccountNature;
use daftar_core::document::{DocumentDraft, DocumentEntry, DocumentError, DocumentStatus};
use daftar_shared::types::{DocumentId, ProjectId};
use daftar_store::{DocumentStore, StoreError};

fn entry(code: &str, name: &str, debit: Decimal, credit: Decimal) -> DocumentEntry {
    DocumentEntry::from_parts(
        code.to_string(),
        name.to_string(),
        String::new(),
        debit,
        credit,
        Some(if debit > Decimal::ZERO {
            AccountNature::Debit
        } else {
            AccountNature::Credit
        }),
    )
}

fn balanced_draft(number: &str) -> DocumentDraft {
    DocumentDraft {
        number: number.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 20),
        description: "سند افتتاحیه".to_string(),
        entries: vec![
            entry("110101", "صندوق", dec!(5000), Decimal::ZERO),
            entry("310101", "سرمایه", Decimal::ZERO, dec!(5000)),
        ],
    }
}

#[test]
fn test_create_balanced_document() {
    let store = DocumentStore::new();
    let project = ProjectId::new();

    let doc = store
        .create(project, balanced_draft("1"), DocumentStatus::Temporary)
        .unwrap();
    assert_eq!(doc.totals.total_debit, dec!(5000));
    assert!(doc.totals.is_balanced);
    assert_eq!(doc.status, DocumentStatus::Temporary);
    assert_eq!(store.list(project).len(), 1);
}

#[test]
fn test_create_unbalanced_document_rejected() {
    let store = DocumentStore::new();
    let project = ProjectId::new();

    let mut draft = balanced_draft("1");
    draft.entries[1].credit = dec!(4000);
    let err = store
        .create(project, draft, DocumentStatus::Temporary)
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Document(DocumentError::Unbalanced { .. })
    ));
    assert_eq!(err.message_fa(), "جمع بدهکار باید برابر جمع بستانکار باشد");
    assert!(store.list(project).is_empty());
}

#[test]
fn test_update_keeps_id_and_status() {
    let store = DocumentStore::new();
    let project = ProjectId::new();
    let doc = store
        .create(project, balanced_draft("1"), DocumentStatus::Temporary)
        .unwrap();

    let mut draft = balanced_draft("1");
    draft.description = "اصلاح شده".to_string();
    let updated = store.update(project, doc.id, draft).unwrap();
    assert_eq!(updated.id, doc.id);
    assert_eq!(updated.status, DocumentStatus::Temporary);
    assert_eq!(updated.description, "اصلاح شده");
    assert_eq!(store.list(project).len(), 1);
}

#[test]
fn test_permanent_document_is_edit_locked() {
    let store = DocumentStore::new();
    let project = ProjectId::new();
    let doc = store
        .create(project, balanced_draft("1"), DocumentStatus::Permanent)
        .unwrap();

    let err = store.update(project, doc.id, balanced_draft("1")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Document(DocumentError::DocumentLocked)
    ));
    assert_eq!(err.http_status_code(), 409);
}

#[test]
fn test_status_round_trip_unlocks_editing() {
    let store = DocumentStore::new();
    let project = ProjectId::new();
    let doc = store
        .create(project, balanced_draft("1"), DocumentStatus::Temporary)
        .unwrap();

    store
        .set_status(project, doc.id, DocumentStatus::Permanent)
        .unwrap();
    assert!(store.update(project, doc.id, balanced_draft("1")).is_err());

    store
        .set_status(project, doc.id, DocumentStatus::Temporary)
        .unwrap();
    assert!(store.update(project, doc.id, balanced_draft("1")).is_ok());
}

#[test]
fn test_same_status_transition_rejected() {
    let store = DocumentStore::new();
    let project = ProjectId::new();
    let doc = store
        .create(project, balanced_draft("1"), DocumentStatus::Temporary)
        .unwrap();

    let err = store
        .set_status(project, doc.id, DocumentStatus::Temporary)
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Document(DocumentError::InvalidStatusTransition { .. })
    ));
}

#[test]
fn test_delete_only_temporary() {
    let store = DocumentStore::new();
    let project = ProjectId::new();
    let permanent = store
        .create(project, balanced_draft("1"), DocumentStatus::Permanent)
        .unwrap();
    let temporary = store
        .create(project, balanced_draft("2"), DocumentStatus::Temporary)
        .unwrap();

    let err = store.delete(project, permanent.id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Document(DocumentError::CanOnlyDeleteTemporary)
    ));

    store.delete(project, temporary.id).unwrap();
    assert_eq!(store.list(project).len(), 1);
}

#[test]
fn test_get_missing_document() {
    let store = DocumentStore::new();
    let err = store.get(ProjectId::new(), DocumentId::new()).unwrap_err();
    assert!(matches!(err, StoreError::DocumentNotFound(_)));
    assert_eq!(err.http_status_code(), 404);
}

#[test]
fn test_list_sorted_by_date_then_number() {
    let store = DocumentStore::new();
    let project = ProjectId::new();

    let mut later = balanced_draft("1");
    later.date = NaiveDate::from_ymd_opt(2024, 4, 1);
    store
        .create(project, later, DocumentStatus::Temporary)
        .unwrap();
    store
        .create(project, balanced_draft("3"), DocumentStatus::Temporary)
        .unwrap();
    store
        .create(project, balanced_draft("2"), DocumentStatus::Temporary)
        .unwrap();

    let numbers: Vec<String> = store
        .list(project)
        .into_iter()
        .map(|d| d.number)
        .collect();
    assert_eq!(numbers, ["2", "3", "1"]);
}

#[test]
fn test_documents_are_project_scoped() {
    let store = DocumentStore::new();
    let first = ProjectId::new();
    let second = ProjectId::new();

    let doc = store
        .create(first, balanced_draft("1"), DocumentStatus::Temporary)
        .unwrap();
    assert!(store.get(second, doc.id).is_err());
    assert!(store.list(second).is_empty());
}

#[test]
fn test_mutating_unknown_project_reports_not_found() {
    let store = DocumentStore::new();
    let stray = ProjectId::new();
    let id = DocumentId::new();

    let err = store.update(stray, id, balanced_draft("1")).unwrap_err();
    assert!(matches!(err, StoreError::DocumentNotFound(_)));
    let err = store
        .set_status(stray, id, DocumentStatus::Permanent)
        .unwrap_err();
    assert!(matches!(err, StoreError::DocumentNotFound(_)));
    let err = store.delete(stray, id).unwrap_err();
    assert!(matches!(err, StoreError::DocumentNotFound(_)));
    assert!(store.list(stray).is_empty());
}
