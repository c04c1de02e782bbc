//! Document error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::DocumentStatus;

/// Errors that can occur during document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    // ========== Validation Errors ==========
    /// Document number and date are both required.
    #[error("Document number and date are required")]
    MissingHeaderFields,

    /// Document has no entries at all.
    #[error("Document must have at least one entry")]
    NoEntries,

    /// Document has entries but none is postable.
    #[error("Document must have at least one valid entry")]
    NoPostableEntries,

    /// Total debits do not equal total credits.
    #[error("Document is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount over postable entries.
        debit: Decimal,
        /// Total credit amount over postable entries.
        credit: Decimal,
    },

    /// Entry amount cannot be negative.
    #[error("Entry amount cannot be negative")]
    NegativeAmount,

    // ========== Nature Errors ==========
    /// Credit amount on an account with debit nature.
    #[error("Account has debit nature, credit amount not allowed")]
    DebitNatureViolation,

    /// Debit amount on an account with credit nature.
    #[error("Account has credit nature, debit amount not allowed")]
    CreditNatureViolation,

    // ========== State Errors ==========
    /// Permanent documents are edit-locked.
    #[error("Permanent document cannot be modified")]
    DocumentLocked,

    /// Only temporary documents can be deleted.
    #[error("Only temporary documents can be deleted")]
    CanOnlyDeleteTemporary,

    /// Requested status transition is not an explicit allowed action.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: DocumentStatus,
        /// Requested status.
        to: DocumentStatus,
    },
}

impl DocumentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeaderFields => "MISSING_HEADER_FIELDS",
            Self::NoEntries => "NO_ENTRIES",
            Self::NoPostableEntries => "NO_POSTABLE_ENTRIES",
            Self::Unbalanced { .. } => "UNBALANCED_DOCUMENT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::DebitNatureViolation => "DEBIT_NATURE_VIOLATION",
            Self::CreditNatureViolation => "CREDIT_NATURE_VIOLATION",
            Self::DocumentLocked => "DOCUMENT_LOCKED",
            Self::CanOnlyDeleteTemporary => "CAN_ONLY_DELETE_TEMPORARY",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingHeaderFields
            | Self::NoEntries
            | Self::NoPostableEntries
            | Self::Unbalanced { .. }
            | Self::NegativeAmount
            | Self::DebitNatureViolation
            | Self::CreditNatureViolation => 400,

            Self::DocumentLocked
            | Self::CanOnlyDeleteTemporary
            | Self::InvalidStatusTransition { .. } => 409,
        }
    }

    /// Returns the localized message shown to the user.
    #[must_use]
    pub const fn message_fa(&self) -> &'static str {
        match self {
            Self::MissingHeaderFields => "شماره سند و تاریخ سند الزامی است",
            Self::NoEntries => "حداقل یک ردیف باید اضافه شود",
            Self::NoPostableEntries => "حداقل یک ردیف معتبر باید اضافه شود",
            Self::Unbalanced { .. } => "جمع بدهکار باید برابر جمع بستانکار باشد",
            Self::NegativeAmount => "مبلغ نمی‌تواند منفی باشد",
            Self::DebitNatureViolation => "این حساب ماهیت بدهکار دارد",
            Self::CreditNatureViolation => "این حساب ماهیت بستانکار دارد",
            Self::DocumentLocked => "سند دائم قابل ویرایش نیست",
            Self::CanOnlyDeleteTemporary => "فقط سند موقت قابل حذف است",
            Self::InvalidStatusTransition { .. } => "تغییر وضعیت سند مجاز نیست",
        }
    }
}
