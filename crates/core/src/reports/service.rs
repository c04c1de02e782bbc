//! Report aggregation service.
//!
//! Pure functions over pre-fetched documents and the account index.
//! Accounts are keyed by full code; entries whose code no longer
//! resolves (coding edited after posting) fall back to the name and
//! nature captured on the entry.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::coding::{AccountIndex, AccountNature};
use crate::document::{Document, DocumentTotals};

use super::types::{
    AccountTotals, BalanceSheetReport, CashFlowReport, IncomeStatementReport, MonthlyFlow, Report,
    ReportSection, ReportType, TrialBalanceReport,
};

/// First group code of the profit-and-loss range in the conventional
/// chart layout (groups 6-9 are temporary accounts).
const PROFIT_AND_LOSS_FIRST_GROUP: char = '6';

/// Group code holding the monetary assets the cash flow report tracks.
const MONETARY_GROUP: char = '1';

/// Report aggregation service.
pub struct ReportService;

impl ReportService {
    /// Builds the requested report.
    #[must_use]
    pub fn build(report_type: ReportType, index: &AccountIndex, documents: &[Document]) -> Report {
        match report_type {
            ReportType::TrialBalance => {
                Report::TrialBalance(Self::trial_balance(index, documents))
            }
            ReportType::BalanceSheet => {
                Report::BalanceSheet(Self::balance_sheet(index, documents))
            }
            ReportType::IncomeStatement => {
                Report::IncomeStatement(Self::income_statement(index, documents))
            }
            ReportType::CashFlow => Report::CashFlow(Self::cash_flow(documents)),
        }
    }

    /// Per-account totals with grand totals.
    #[must_use]
    pub fn trial_balance(index: &AccountIndex, documents: &[Document]) -> TrialBalanceReport {
        let accounts = Self::account_totals(index, documents);
        let total_debit: Decimal = accounts.iter().map(|a| a.total_debit).sum();
        let total_credit: Decimal = accounts.iter().map(|a| a.total_credit).sum();

        TrialBalanceReport {
            report_type: ReportType::TrialBalance,
            accounts,
            totals: DocumentTotals::new(total_debit, total_credit),
        }
    }

    /// Accounts split into a debit-nature and a credit-nature side.
    ///
    /// Two-sided accounts land on the side of their net balance.
    #[must_use]
    pub fn balance_sheet(index: &AccountIndex, documents: &[Document]) -> BalanceSheetReport {
        let mut debit_side = ReportSection::default();
        let mut credit_side = ReportSection::default();

        for mut account in Self::account_totals(index, documents) {
            let net = account.total_debit - account.total_credit;
            let on_debit_side = match account.nature {
                AccountNature::Debit => true,
                AccountNature::Credit => false,
                AccountNature::DebitCredit => net >= Decimal::ZERO,
            };

            if on_debit_side {
                account.balance = net;
                debit_side.total += account.balance;
                debit_side.accounts.push(account);
            } else {
                account.balance = -net;
                credit_side.total += account.balance;
                credit_side.accounts.push(account);
            }
        }

        let is_balanced = debit_side.total == credit_side.total;
        BalanceSheetReport {
            report_type: ReportType::BalanceSheet,
            debit_side,
            credit_side,
            is_balanced,
        }
    }

    /// Revenue minus expenses over the profit-and-loss groups.
    #[must_use]
    pub fn income_statement(
        index: &AccountIndex,
        documents: &[Document],
    ) -> IncomeStatementReport {
        let mut revenue = ReportSection::default();
        let mut expenses = ReportSection::default();

        for mut account in Self::account_totals(index, documents) {
            if !account
                .code
                .starts_with(|c| c >= PROFIT_AND_LOSS_FIRST_GROUP && c <= '9')
            {
                continue;
            }

            let net = account.total_debit - account.total_credit;
            let is_expense = match account.nature {
                AccountNature::Debit => true,
                AccountNature::Credit => false,
                AccountNature::DebitCredit => net >= Decimal::ZERO,
            };

            if is_expense {
                account.balance = net;
                expenses.total += account.balance;
                expenses.accounts.push(account);
            } else {
                account.balance = -net;
                revenue.total += account.balance;
                revenue.accounts.push(account);
            }
        }

        let net_income = revenue.total - expenses.total;
        IncomeStatementReport {
            report_type: ReportType::IncomeStatement,
            revenue,
            expenses,
            net_income,
        }
    }

    /// Monthly net movement over the monetary-asset group.
    #[must_use]
    pub fn cash_flow(documents: &[Document]) -> CashFlowReport {
        let mut by_month: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

        for document in documents {
            let period = document.date.format("%Y-%m").to_string();
            for entry in &document.entries {
                if !entry.account_code.starts_with(MONETARY_GROUP) {
                    continue;
                }
                let flows = by_month.entry(period.clone()).or_default();
                flows.0 += entry.debit;
                flows.1 += entry.credit;
            }
        }

        let months: Vec<MonthlyFlow> = by_month
            .into_iter()
            .map(|(period, (inflow, outflow))| MonthlyFlow {
                period,
                inflow,
                outflow,
                net: inflow - outflow,
            })
            .collect();
        let net = months.iter().map(|m| m.net).sum();

        CashFlowReport {
            report_type: ReportType::CashFlow,
            months,
            net,
        }
    }

    /// Aggregates entries of all documents by account code.
    fn account_totals(index: &AccountIndex, documents: &[Document]) -> Vec<AccountTotals> {
        let mut totals: BTreeMap<String, AccountTotals> = BTreeMap::new();

        for document in documents {
            for entry in &document.entries {
                let account = totals.entry(entry.account_code.clone()).or_insert_with(|| {
                    let (name, nature) = match index.resolve(&entry.account_code) {
                        Some(resolved) => (resolved.name.clone(), resolved.nature),
                        None => (
                            entry.account_name.clone(),
                            entry.account_nature.unwrap_or(AccountNature::DebitCredit),
                        ),
                    };
                    AccountTotals {
                        code: entry.account_code.clone(),
                        name,
                        nature,
                        total_debit: Decimal::ZERO,
                        total_credit: Decimal::ZERO,
                        balance: Decimal::ZERO,
                    }
                });
                account.total_debit += entry.debit;
                account.total_credit += entry.credit;
            }
        }

        totals
            .into_values()
            .map(|mut account| {
                account.balance = account.total_debit - account.total_credit;
                account
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::{AccountNature, CodingTree};
    use crate::document::{
        validate_document, Document, DocumentDraft, DocumentEntry, DocumentStatus,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_index() -> AccountIndex {
        let mut tree = CodingTree::new();
        let assets = tree.add_group("1", "دارایی‌ها").unwrap();
        let cash_class = tree
            .add_class(assets, "1", "موجودی نقد", AccountNature::Debit)
            .unwrap();
        tree.add_subclass(cash_class, "01", "بانک‌ها", false).unwrap();

        let equity = tree.add_group("3", "حقوق صاحبان سهام").unwrap();
        let capital = tree
            .add_class(equity, "1", "سرمایه", AccountNature::Credit)
            .unwrap();
        tree.add_subclass(capital, "01", "سرمایه اولیه", false)
            .unwrap();

        let revenue = tree.add_group("6", "درآمدها").unwrap();
        let sales = tree
            .add_class(revenue, "1", "فروش", AccountNature::Credit)
            .unwrap();
        tree.add_subclass(sales, "01", "فروش کالا", false).unwrap();

        let expense = tree.add_group("7", "هزینه‌ها").unwrap();
        let opex = tree
            .add_class(expense, "1", "هزینه‌های عملیاتی", AccountNature::Debit)
            .unwrap();
        tree.add_subclass(opex, "01", "اجاره", false).unwrap();

        tree.account_index()
    }

    fn entry(code: &str, nature: AccountNature, debit: Decimal, credit: Decimal) -> DocumentEntry {
        DocumentEntry::from_parts(
            code.to_string(),
            format!("حساب {code}"),
            String::new(),
            debit,
            credit,
            Some(nature),
        )
    }

    fn document(date: (i32, u32, u32), entries: Vec<DocumentEntry>) -> Document {
        let draft = DocumentDraft {
            number: "1".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            description: String::new(),
            entries,
        };
        Document::from_validated(validate_document(draft).unwrap(), DocumentStatus::Permanent)
    }

    fn sample_documents() -> Vec<Document> {
        vec![
            // Capital contribution: cash 5000 / capital 5000.
            document(
                (2024, 1, 10),
                vec![
                    entry("1101", AccountNature::Debit, dec!(5000), Decimal::ZERO),
                    entry("3101", AccountNature::Credit, Decimal::ZERO, dec!(5000)),
                ],
            ),
            // Sale for cash: cash 2000 / revenue 2000.
            document(
                (2024, 2, 5),
                vec![
                    entry("1101", AccountNature::Debit, dec!(2000), Decimal::ZERO),
                    entry("6101", AccountNature::Credit, Decimal::ZERO, dec!(2000)),
                ],
            ),
            // Rent paid in cash: expense 800 / cash 800.
            document(
                (2024, 2, 20),
                vec![
                    entry("7101", AccountNature::Debit, dec!(800), Decimal::ZERO),
                    entry("1101", AccountNature::Debit, Decimal::ZERO, dec!(800)),
                ],
            ),
        ]
    }

    #[test]
    fn test_trial_balance_totals() {
        let report = ReportService::trial_balance(&sample_index(), &sample_documents());

        assert_eq!(report.accounts.len(), 4);
        assert_eq!(report.totals.total_debit, dec!(7800));
        assert_eq!(report.totals.total_credit, dec!(7800));
        assert!(report.totals.is_balanced);

        let cash = report.accounts.iter().find(|a| a.code == "1101").unwrap();
        assert_eq!(cash.total_debit, dec!(7000));
        assert_eq!(cash.total_credit, dec!(800));
        assert_eq!(cash.balance, dec!(6200));
        // Name comes from the index, not the entries.
        assert_eq!(cash.name, "بانک‌ها");
    }

    #[test]
    fn test_balance_sheet_sides() {
        let report = ReportService::balance_sheet(&sample_index(), &sample_documents());

        // Debit side: cash 6200. Credit side: capital 5000, revenue 2000,
        // expense account sits on the debit side with balance 800.
        assert_eq!(report.debit_side.total, dec!(7000));
        assert_eq!(report.credit_side.total, dec!(7000));
        assert!(report.is_balanced);
    }

    #[test]
    fn test_income_statement_ignores_balance_sheet_groups() {
        let report = ReportService::income_statement(&sample_index(), &sample_documents());

        assert_eq!(report.revenue.total, dec!(2000));
        assert_eq!(report.expenses.total, dec!(800));
        assert_eq!(report.net_income, dec!(1200));
        assert!(report.revenue.accounts.iter().all(|a| a.code.starts_with('6')));
        assert!(report.expenses.accounts.iter().all(|a| a.code.starts_with('7')));
    }

    #[test]
    fn test_cash_flow_by_month() {
        let report = ReportService::cash_flow(&sample_documents());

        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].period, "2024-01");
        assert_eq!(report.months[0].net, dec!(5000));
        assert_eq!(report.months[1].period, "2024-02");
        assert_eq!(report.months[1].inflow, dec!(2000));
        assert_eq!(report.months[1].outflow, dec!(800));
        assert_eq!(report.months[1].net, dec!(1200));
        assert_eq!(report.net, dec!(6200));
    }

    #[test]
    fn test_unresolved_code_falls_back_to_entry_data() {
        let docs = vec![document(
            (2024, 3, 1),
            vec![
                entry("9901", AccountNature::Debit, dec!(10), Decimal::ZERO),
                entry("9902", AccountNature::Credit, Decimal::ZERO, dec!(10)),
            ],
        )];
        let report = ReportService::trial_balance(&sample_index(), &docs);

        let orphan = report.accounts.iter().find(|a| a.code == "9901").unwrap();
        assert_eq!(orphan.name, "حساب 9901");
        assert_eq!(orphan.nature, AccountNature::Debit);
    }

    #[test]
    fn test_empty_documents_produce_empty_reports() {
        let report = ReportService::trial_balance(&sample_index(), &[]);
        assert!(report.accounts.is_empty());
        assert!(report.totals.is_balanced);

        let cash = ReportService::cash_flow(&[]);
        assert!(cash.months.is_empty());
        assert_eq!(cash.net, Decimal::ZERO);
    }
}
