//! Coding error types.

use thiserror::Error;

use daftar_shared::types::{ClassId, DetailId, GroupId, SubClassId};

use super::types::CodingLevel;

/// Errors that can occur while editing the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodingError {
    /// Code segment has the wrong length, non-digit characters, or is out
    /// of the level's numeric range.
    #[error("Invalid {level} code '{code}'")]
    InvalidSegment {
        /// The level the code was proposed for.
        level: CodingLevel,
        /// The rejected code segment.
        code: String,
    },

    /// Code segment already used by a direct sibling.
    #[error("Duplicate {level} code '{code}' among siblings")]
    DuplicateSiblingCode {
        /// The level the code was proposed for.
        level: CodingLevel,
        /// The duplicated code segment.
        code: String,
    },

    /// Group not found.
    #[error("Account group not found: {0}")]
    GroupNotFound(GroupId),

    /// Class not found.
    #[error("Account class not found: {0}")]
    ClassNotFound(ClassId),

    /// Subclass not found.
    #[error("Account subclass not found: {0}")]
    SubClassNotFound(SubClassId),

    /// Detail not found.
    #[error("Account detail not found: {0}")]
    DetailNotFound(DetailId),

    /// Details may not attach to a subclass with `has_details == false`.
    #[error("Subclass {0} does not accept detail accounts")]
    DetailsNotAllowed(SubClassId),

    /// A subclass that still owns details cannot turn `has_details` off.
    #[error("Subclass {0} still has detail accounts attached")]
    SubClassHasDetails(SubClassId),
}

impl CodingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSegment { .. } => "INVALID_CODE",
            Self::DuplicateSiblingCode { .. } => "DUPLICATE_CODE",
            Self::GroupNotFound(_) => "GROUP_NOT_FOUND",
            Self::ClassNotFound(_) => "CLASS_NOT_FOUND",
            Self::SubClassNotFound(_) => "SUBCLASS_NOT_FOUND",
            Self::DetailNotFound(_) => "DETAIL_NOT_FOUND",
            Self::DetailsNotAllowed(_) => "DETAILS_NOT_ALLOWED",
            Self::SubClassHasDetails(_) => "SUBCLASS_HAS_DETAILS",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidSegment { .. }
            | Self::DetailsNotAllowed(_)
            | Self::SubClassHasDetails(_) => 400,
            Self::DuplicateSiblingCode { .. } => 409,
            Self::GroupNotFound(_)
            | Self::ClassNotFound(_)
            | Self::SubClassNotFound(_)
            | Self::DetailNotFound(_) => 404,
        }
    }

    /// Returns the localized message shown to the user.
    #[must_use]
    pub const fn message_fa(&self) -> &'static str {
        match self {
            Self::InvalidSegment { .. } => "کد واردشده معتبر نیست",
            Self::DuplicateSiblingCode { .. } => "این کد قبلا استفاده شده است",
            Self::GroupNotFound(_) => "گروه حساب یافت نشد",
            Self::ClassNotFound(_) => "کل حساب یافت نشد",
            Self::SubClassNotFound(_) => "معین حساب یافت نشد",
            Self::DetailNotFound(_) => "تفصیلی حساب یافت نشد",
            Self::DetailsNotAllowed(_) => "این معین امکان افزودن تفصیلی ندارد",
            Self::SubClassHasDetails(_) => "این معین دارای تفصیلی است",
        }
    }
}
