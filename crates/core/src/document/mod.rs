//! Double-entry journal document balancing.
//!
//! A document is a set of debit/credit entries against coded accounts.
//! Entries are nature-checked as they are edited, the save pipeline
//! enforces double-entry integrity, and the status state machine locks
//! permanent documents against any further edit.

pub mod entry;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use entry::DocumentEntry;
pub use error::DocumentError;
pub use types::{Document, DocumentDraft, DocumentStatus, DocumentTotals};
pub use validation::{
    calculate_totals, validate_can_delete, validate_can_modify, validate_document,
    validate_status_change, ValidatedDocument,
};
