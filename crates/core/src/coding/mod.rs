//! Hierarchical chart-of-accounts coding scheme.
//!
//! Accounts are coded on four nested levels: group (1 digit), class
//! (1 digit), subclass (2 digits) and detail (2 digits). The canonical
//! full code of an account is the concatenation of its ancestor codes,
//! so a detail under group `1`, class `2`, subclass `03` with its own
//! code `04` is addressed as `120304`.

pub mod error;
pub mod index;
pub mod tree;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::CodingError;
pub use index::{AccountIndex, ResolvedAccount};
pub use tree::{ClassView, CodingTree, DetailView, GroupView, SubClassView};
pub use types::{
    AccountClass, AccountDetail, AccountGroup, AccountNature, AccountSubClass, CodingLevel,
};
