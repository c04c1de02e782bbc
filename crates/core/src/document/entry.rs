//! Document entry rows and their nature-checked mutation rules.

use rust_decimal::Decimal;
use serde::Serialize;

use daftar_shared::types::EntryId;

use crate::coding::{AccountNature, ResolvedAccount};

use super::error::DocumentError;

/// One debit-or-credit line within a journal document.
///
/// An entry starts blank and becomes postable once its account is
/// resolved and one side carries an amount. Amount mutations are checked
/// against the resolved account's nature and rejected without touching
/// the prior value on violation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    /// The entry ID.
    pub id: EntryId,
    /// Full account code, empty while unresolved.
    pub account_code: String,
    /// Account display name, empty while unresolved.
    pub account_name: String,
    /// Free-text row description.
    pub description: String,
    /// Debit amount, zero or positive.
    pub debit: Decimal,
    /// Credit amount, zero or positive.
    pub credit: Decimal,
    /// Nature of the resolved account, `None` while unresolved.
    pub account_nature: Option<AccountNature>,
}

impl DocumentEntry {
    /// Creates a blank entry row.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: EntryId::new(),
            account_code: String::new(),
            account_name: String::new(),
            description: String::new(),
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            account_nature: None,
        }
    }

    /// Creates an entry from already-known parts, e.g. an API payload.
    #[must_use]
    pub fn from_parts(
        account_code: String,
        account_name: String,
        description: String,
        debit: Decimal,
        credit: Decimal,
        account_nature: Option<AccountNature>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            account_code,
            account_name,
            description,
            debit,
            credit,
            account_nature,
        }
    }

    /// Sets the debit amount after checking the account's nature.
    ///
    /// # Errors
    ///
    /// Rejects negative amounts, and any positive amount when the
    /// resolved account has credit nature. The prior value is kept on
    /// rejection.
    pub fn set_debit(&mut self, amount: Decimal) -> Result<(), DocumentError> {
        if amount < Decimal::ZERO {
            return Err(DocumentError::NegativeAmount);
        }
        if self.account_nature == Some(AccountNature::Credit) && amount > Decimal::ZERO {
            return Err(DocumentError::CreditNatureViolation);
        }
        self.debit = amount;
        Ok(())
    }

    /// Sets the credit amount after checking the account's nature.
    ///
    /// # Errors
    ///
    /// Rejects negative amounts, and any positive amount when the
    /// resolved account has debit nature. The prior value is kept on
    /// rejection.
    pub fn set_credit(&mut self, amount: Decimal) -> Result<(), DocumentError> {
        if amount < Decimal::ZERO {
            return Err(DocumentError::NegativeAmount);
        }
        if self.account_nature == Some(AccountNature::Debit) && amount > Decimal::ZERO {
            return Err(DocumentError::DebitNatureViolation);
        }
        self.credit = amount;
        Ok(())
    }

    /// Resolves the row against a looked-up account.
    ///
    /// Takes the account's code, name, and nature, and resets both
    /// amounts to zero so they are re-entered under the newly known
    /// nature constraint.
    pub fn resolve_account(&mut self, account: &ResolvedAccount) {
        self.account_code = account.code.clone();
        self.account_name = account.name.clone();
        self.account_nature = Some(account.nature);
        self.debit = Decimal::ZERO;
        self.credit = Decimal::ZERO;
    }

    /// Returns true if the row can be posted: resolved account and a
    /// nonzero amount on at least one side.
    #[must_use]
    pub fn is_postable(&self) -> bool {
        !self.account_code.is_empty()
            && !self.account_name.is_empty()
            && (self.debit > Decimal::ZERO || self.credit > Decimal::ZERO)
    }
}
