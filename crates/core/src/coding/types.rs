//! Coding domain types.
//!
//! This module defines the four node types of the chart-of-accounts tree
//! and the enums shared across the coding scheme.

use serde::{Deserialize, Serialize};
use std::fmt;

use daftar_shared::types::{ClassId, DetailId, GroupId, SubClassId};

/// Account nature: which side of a journal entry an account may carry.
///
/// An account with debit nature rejects credit amounts, an account with
/// credit nature rejects debit amounts, and a two-sided account accepts
/// either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountNature {
    /// Account normally carries a debit balance.
    Debit,
    /// Account normally carries a credit balance.
    Credit,
    /// Account may carry either side.
    DebitCredit,
}

impl AccountNature {
    /// Returns the string representation of the nature.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::DebitCredit => "debit_credit",
        }
    }

    /// Parses a nature from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            "debit_credit" => Some(Self::DebitCredit),
            _ => None,
        }
    }
}

impl fmt::Display for AccountNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four levels of the coding hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodingLevel {
    /// Top level, 1 digit (1-9).
    Group,
    /// Second level, 1 digit (1-9).
    Class,
    /// Third level, 2 digits (01-99).
    SubClass,
    /// Leaf level, 2 digits (01-99).
    Detail,
}

impl CodingLevel {
    /// Number of digits a code segment on this level must have.
    #[must_use]
    pub const fn segment_width(self) -> usize {
        match self {
            Self::Group | Self::Class => 1,
            Self::SubClass | Self::Detail => 2,
        }
    }

    /// Highest numeric value a segment on this level may hold.
    #[must_use]
    pub const fn max_value(self) -> u32 {
        match self {
            Self::Group | Self::Class => 9,
            Self::SubClass | Self::Detail => 99,
        }
    }

    /// Formats a numeric value as a zero-padded segment for this level.
    #[must_use]
    pub fn format_segment(self, value: u32) -> String {
        format!("{value:0width$}", width = self.segment_width())
    }

    /// Returns the string representation of the level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Class => "class",
            Self::SubClass => "subclass",
            Self::Detail => "detail",
        }
    }

    /// Parses a level from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "group" => Some(Self::Group),
            "class" => Some(Self::Class),
            "subclass" => Some(Self::SubClass),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

impl fmt::Display for CodingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Top-level account group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountGroup {
    /// The group ID.
    pub id: GroupId,
    /// Single-digit code, unique among groups.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Position in the user-defined ordering.
    pub sort_order: u32,
}

/// Account class under a group. Carries the nature inherited by every
/// leaf account beneath it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountClass {
    /// The class ID.
    pub id: ClassId,
    /// The owning group.
    pub group_id: GroupId,
    /// Single-digit code, unique among the group's classes.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Nature constraint for leaf entries under this class.
    pub nature: AccountNature,
}

/// Account subclass under a class.
///
/// When `has_details` is false the subclass is itself a selectable leaf
/// and no detail may attach to it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSubClass {
    /// The subclass ID.
    pub id: SubClassId,
    /// The owning class.
    pub class_id: ClassId,
    /// Two-digit code, unique among the class's subclasses.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Whether detail accounts may attach beneath this subclass.
    pub has_details: bool,
}

/// Leaf detail account under a subclass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    /// The detail ID.
    pub id: DetailId,
    /// The owning subclass.
    pub subclass_id: SubClassId,
    /// Two-digit code, unique among the subclass's details.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}
