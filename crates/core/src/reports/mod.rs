//! Financial report aggregation.
//!
//! Pure aggregation over persisted documents joined with the account
//! index; no I/O. Every persisted document is balanced by construction,
//! so report totals inherit double-entry integrity.

pub mod service;
pub mod types;

pub use service::ReportService;
pub use types::{
    AccountTotals, BalanceSheetReport, CashFlowReport, IncomeStatementReport, MonthlyFlow, Report,
    ReportSection, ReportType, TrialBalanceReport,
};
