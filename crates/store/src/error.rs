//! Store error types.

use thiserror::Error;

use daftar_core::coding::CodingError;
use daftar_core::document::DocumentError;
use daftar_shared::types::{DocumentId, ProjectId};

/// Errors surfaced by the store layer.
///
/// Domain errors pass through unchanged; the store adds only the
/// failures it owns: unknown ids and import preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Coding rule violation.
    #[error(transparent)]
    Coding(#[from] CodingError),

    /// Document rule violation.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Document not found.
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Import source project has no coding to copy.
    #[error("Source project has no coding: {0}")]
    ImportSourceEmpty(ProjectId),

    /// Import target project already has coding.
    #[error("Target project already has coding: {0}")]
    ImportTargetNotEmpty(ProjectId),

    /// Import source and target are the same project.
    #[error("Source and target projects are the same")]
    ImportSameProject,
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Coding(e) => e.error_code(),
            Self::Document(e) => e.error_code(),
            Self::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::ImportSourceEmpty(_) => "IMPORT_SOURCE_EMPTY",
            Self::ImportTargetNotEmpty(_) => "IMPORT_TARGET_NOT_EMPTY",
            Self::ImportSameProject => "IMPORT_SAME_PROJECT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Coding(e) => e.http_status_code(),
            Self::Document(e) => e.http_status_code(),
            Self::DocumentNotFound(_) => 404,
            Self::ImportSourceEmpty(_)
            | Self::ImportTargetNotEmpty(_)
            | Self::ImportSameProject => 409,
        }
    }

    /// Returns the localized message shown to the user.
    #[must_use]
    pub const fn message_fa(&self) -> &'static str {
        match self {
            Self::Coding(e) => e.message_fa(),
            Self::Document(e) => e.message_fa(),
            Self::DocumentNotFound(_) => "سند یافت نشد",
            Self::ImportSourceEmpty(_) => "کدینگ پروژه مبدا خالی است",
            Self::ImportTargetNotEmpty(_) => "کدینگ پروژه مقصد خالی نیست",
            Self::ImportSameProject => "پروژه مبدا و مقصد یکسان است",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_pass_through() {
        let err = StoreError::from(DocumentError::NoEntries);
        assert_eq!(err.error_code(), "NO_ENTRIES");
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.message_fa(), "حداقل یک ردیف باید اضافه شود");
    }

    #[test]
    fn test_store_owned_errors() {
        assert_eq!(
            StoreError::DocumentNotFound(DocumentId::new()).http_status_code(),
            404
        );
        assert_eq!(StoreError::ImportSameProject.http_status_code(), 409);
        assert_eq!(
            StoreError::ImportTargetNotEmpty(ProjectId::new()).error_code(),
            "IMPORT_TARGET_NOT_EMPTY"
        );
    }
}
