//! In-memory per-project repositories for Daftar.
//!
//! The original system's persistence is an external collaborator, so the
//! store keeps repository-shaped state behind concurrent maps instead of
//! a database. Bulk operations (delete-all, import) act on one project
//! entry at a time and are all-or-nothing.

pub mod coding;
pub mod document;
pub mod error;

pub use coding::CodingStore;
pub use document::DocumentStore;
pub use error::StoreError;
