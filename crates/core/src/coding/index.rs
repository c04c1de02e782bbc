//! Flattened account lookup index.
//!
//! Built once from the coding tree and consulted on every document entry
//! resolution, mapping a full account code to its display name and the
//! nature inherited from the owning class.

use std::collections::HashMap;

use serde::Serialize;

use super::types::{AccountNature, CodingLevel};

/// A selectable leaf account, addressed by its canonical full code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAccount {
    /// Canonical full code (4 or 6 digits).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Nature inherited from the owning class.
    pub nature: AccountNature,
    /// Which level the leaf sits on.
    pub level: CodingLevel,
}

/// Lookup table from full account code to resolved account.
#[derive(Debug, Clone, Default)]
pub struct AccountIndex {
    accounts: HashMap<String, ResolvedAccount>,
}

impl AccountIndex {
    /// Builds an index from a list of resolved accounts.
    #[must_use]
    pub fn new(accounts: Vec<ResolvedAccount>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|a| (a.code.clone(), a))
                .collect(),
        }
    }

    /// Resolves a full account code; `None` on miss.
    #[must_use]
    pub fn resolve(&self, code: &str) -> Option<&ResolvedAccount> {
        self.accounts.get(code)
    }

    /// Returns all accounts, sorted by code.
    #[must_use]
    pub fn accounts(&self) -> Vec<&ResolvedAccount> {
        let mut accounts: Vec<&ResolvedAccount> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Number of selectable accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the index holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(code: &str, name: &str, nature: AccountNature) -> ResolvedAccount {
        ResolvedAccount {
            code: code.to_string(),
            name: name.to_string(),
            nature,
            level: CodingLevel::Detail,
        }
    }

    #[test]
    fn test_resolve_hit_and_miss() {
        let index = AccountIndex::new(vec![account("120304", "بانک ملی", AccountNature::Debit)]);
        assert!(index.resolve("120304").is_some());
        assert!(index.resolve("999999").is_none());
    }

    #[test]
    fn test_accounts_sorted_by_code() {
        let index = AccountIndex::new(vec![
            account("2101", "ب", AccountNature::Credit),
            account("1203", "الف", AccountNature::Debit),
        ]);
        let codes: Vec<&str> = index.accounts().iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, ["1203", "2101"]);
    }

    #[test]
    fn test_empty_index() {
        let index = AccountIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
