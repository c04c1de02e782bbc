//! Document domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use daftar_shared::types::DocumentId;

use super::entry::DocumentEntry;
use super::validation::ValidatedDocument;

/// Document lifecycle status.
///
/// Documents are created temporary and may be freely edited. Making a
/// document permanent locks it against any edit; the only way back is
/// the explicit revert action, which typically gates a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Freely editable working state.
    Temporary,
    /// Edit-locked, finalized state.
    Permanent,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temporary => "temporary",
            Self::Permanent => "permanent",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "temporary" => Some(Self::Temporary),
            "permanent" => Some(Self::Permanent),
            _ => None,
        }
    }

    /// Returns true if the document can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Temporary)
    }

    /// Returns true if the document is edit-locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Permanent)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document totals for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    /// Total debit amount over postable entries.
    pub total_debit: Decimal,
    /// Total credit amount over postable entries.
    pub total_credit: Decimal,
    /// Whether debits equal credits exactly.
    pub is_balanced: bool,
}

impl DocumentTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

/// Unvalidated document input, as assembled by the entry surface.
#[derive(Debug, Clone, Default)]
pub struct DocumentDraft {
    /// User-entered document number.
    pub number: String,
    /// Document date.
    pub date: Option<NaiveDate>,
    /// Free-text description.
    pub description: String,
    /// Entry rows, blanks included.
    pub entries: Vec<DocumentEntry>,
}

/// A persisted journal document.
///
/// Always balanced: construction goes through the save pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The document ID.
    pub id: DocumentId,
    /// User-entered document number.
    pub number: String,
    /// Document date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Postable entries (blank rows already dropped).
    pub entries: Vec<DocumentEntry>,
    /// Debit/credit totals.
    pub totals: DocumentTotals,
    /// Lifecycle status.
    pub status: DocumentStatus,
}

impl Document {
    /// Builds a document from validated input with the caller-chosen status.
    #[must_use]
    pub fn from_validated(validated: ValidatedDocument, status: DocumentStatus) -> Self {
        Self {
            id: DocumentId::new(),
            number: validated.number,
            date: validated.date,
            description: validated.description,
            entries: validated.entries,
            totals: validated.totals,
            status,
        }
    }
}
