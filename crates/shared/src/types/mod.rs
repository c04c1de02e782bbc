//! Shared domain types.

pub mod id;

pub use id::{ClassId, DetailId, DocumentId, EntryId, GroupId, ProjectId, SubClassId};
