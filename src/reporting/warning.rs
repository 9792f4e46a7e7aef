use std::fmt;

use serde::{Deserialize, Serialize};

use super::classifier::Bucket;
use crate::ledger::Amount;

/// Data problems found while building statements. None of them stops a
/// report; each one is surfaced next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// The code matches no rule of the chart; the balance is shown on the
    /// "Comptes non classés" line.
    UnclassifiedAccount {
        code: String,
        name: String,
        balance: Amount,
    },
    /// The account carries a balance on the side opposite to its normal one.
    AbnormalBalance {
        code: String,
        name: String,
        bucket: Bucket,
        balance: Amount,
    },
    /// Class 89 balances are shown but not deducted from the net result.
    IncomeTaxNotDeducted { amount: Amount },
    /// Total actif differs from total passif.
    Unbalanced {
        total_actif: Amount,
        total_passif: Amount,
    },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::UnclassifiedAccount {
                code,
                name,
                balance,
            } => write!(
                f,
                "account `{code}` ({name}) matches no SYSCOHADA line; balance {balance} reported as unclassified"
            ),
            ReportWarning::AbnormalBalance {
                code,
                name,
                bucket,
                balance,
            } => write!(
                f,
                "account `{code}` ({name}) carries an abnormal balance of {balance} in `{}`",
                bucket.label()
            ),
            ReportWarning::IncomeTaxNotDeducted { amount } => write!(
                f,
                "income tax of {amount} is not deducted from the net result"
            ),
            ReportWarning::Unbalanced {
                total_actif,
                total_passif,
            } => write!(
                f,
                "balance sheet does not balance: actif {total_actif} != passif {total_passif}"
            ),
        }
    }
}
