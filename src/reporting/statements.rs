use serde::{Deserialize, Serialize};

use super::{
    aggregator::BucketTotals,
    balance_sheet::{BalanceCheck, BilanActif, BilanPassif},
    income_statement::IncomeStatement,
    row::Row,
    warning::ReportWarning,
};
use crate::ledger::Account;

/// Income statement and balance sheet built from one account snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialStatements {
    pub income_statement: IncomeStatement,
    pub actif: BilanActif,
    pub passif: BilanPassif,
    pub check: BalanceCheck,
    pub warnings: Vec<ReportWarning>,
}

impl FinancialStatements {
    /// Computes the income statement first, then feeds its net result into
    /// the passif. Never fails: data problems come back as warnings.
    pub fn build(accounts: &[Account]) -> Self {
        let totals = BucketTotals::aggregate(accounts);
        let income_statement = IncomeStatement::compute(&totals);
        let actif = BilanActif::compute(&totals);
        let passif = BilanPassif::compute(&totals, income_statement.net_result());
        let check = BalanceCheck::new(&actif, &passif);

        let mut warnings = totals.warnings().to_vec();
        if income_statement.impot_sur_resultat != 0 {
            warnings.push(ReportWarning::IncomeTaxNotDeducted {
                amount: income_statement.impot_sur_resultat,
            });
        }
        if !check.is_balanced() {
            warnings.push(ReportWarning::Unbalanced {
                total_actif: check.total_actif,
                total_passif: check.total_passif,
            });
        }
        for warning in &warnings {
            tracing::warn!(%warning, "financial statement warning");
        }

        Self {
            income_statement,
            actif,
            passif,
            check,
            warnings,
        }
    }

    pub fn resultat_rows(&self) -> Vec<Row> {
        self.income_statement.rows()
    }

    pub fn actif_rows(&self) -> Vec<Row> {
        self.actif.rows()
    }

    pub fn passif_rows(&self) -> Vec<Row> {
        self.passif.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_yields_zero_statements() {
        let statements = FinancialStatements::build(&[]);
        assert_eq!(statements.income_statement.resultat_net, 0);
        assert_eq!(statements.check.total_actif, 0);
        assert_eq!(statements.check.total_passif, 0);
        assert!(statements.warnings.is_empty());
    }

    #[test]
    fn imbalance_is_reported_as_warning() {
        let accounts = vec![Account::with_balance("521", "Banque", 100)];
        let statements = FinancialStatements::build(&accounts);
        assert_eq!(statements.check.difference(), 100);
        assert_eq!(
            statements.warnings,
            vec![ReportWarning::Unbalanced {
                total_actif: 100,
                total_passif: 0,
            }]
        );
    }
}
