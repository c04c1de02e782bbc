//! Report data types.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::coding::AccountNature;
use crate::document::DocumentTotals;

/// The report kinds served by the reports endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Per-account debit/credit totals with grand totals.
    TrialBalance,
    /// Debit-nature vs credit-nature account sides.
    BalanceSheet,
    /// Revenue minus expenses over the profit-and-loss groups.
    IncomeStatement,
    /// Monthly net movement over the monetary-asset group.
    CashFlow,
}

impl ReportType {
    /// Returns the string representation of the report type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrialBalance => "trial_balance",
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::CashFlow => "cash_flow",
        }
    }

    /// Parses a report type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trial_balance" => Some(Self::TrialBalance),
            "balance_sheet" => Some(Self::BalanceSheet),
            "income_statement" => Some(Self::IncomeStatement),
            "cash_flow" => Some(Self::CashFlow),
            _ => None,
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated debit/credit totals for one account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTotals {
    /// Full account code.
    pub code: String,
    /// Account display name.
    pub name: String,
    /// Account nature.
    pub nature: AccountNature,
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
    /// Net balance on the account's normal side.
    pub balance: Decimal,
}

/// One side or section of a report with its accounts and total.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts in this section, sorted by code.
    pub accounts: Vec<AccountTotals>,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceReport {
    /// Report type identifier.
    pub report_type: ReportType,
    /// Per-account totals, sorted by code.
    pub accounts: Vec<AccountTotals>,
    /// Grand totals.
    pub totals: DocumentTotals,
}

/// Balance sheet report split by account nature.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetReport {
    /// Report type identifier.
    pub report_type: ReportType,
    /// Debit-nature side (assets).
    pub debit_side: ReportSection,
    /// Credit-nature side (liabilities and equity).
    pub credit_side: ReportSection,
    /// Whether the two sides agree.
    pub is_balanced: bool,
}

/// Income statement over the profit-and-loss groups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementReport {
    /// Report type identifier.
    pub report_type: ReportType,
    /// Revenue section (credit-nature accounts).
    pub revenue: ReportSection,
    /// Expense section (debit-nature accounts).
    pub expenses: ReportSection,
    /// Revenue minus expenses.
    pub net_income: Decimal,
}

/// Net cash movement for one calendar month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlow {
    /// Month in `YYYY-MM` form.
    pub period: String,
    /// Sum of debits into the monetary group.
    pub inflow: Decimal,
    /// Sum of credits out of the monetary group.
    pub outflow: Decimal,
    /// Inflow minus outflow.
    pub net: Decimal,
}

/// Cash flow report over the monetary-asset group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowReport {
    /// Report type identifier.
    pub report_type: ReportType,
    /// Monthly flows, chronological.
    pub months: Vec<MonthlyFlow>,
    /// Net movement over the whole period.
    pub net: Decimal,
}

/// Any of the served reports, for uniform JSON responses.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Trial balance.
    TrialBalance(TrialBalanceReport),
    /// Balance sheet.
    BalanceSheet(BalanceSheetReport),
    /// Income statement.
    IncomeStatement(IncomeStatementReport),
    /// Cash flow.
    CashFlow(CashFlowReport),
}
