//! Sums account balances by code prefix and by reporting bucket.

use std::collections::BTreeMap;

use super::{
    classifier::{classify, Bucket},
    warning::ReportWarning,
};
use crate::ledger::{Account, Amount};

/// Sum of absolute balances of every account whose code starts with `prefix`.
///
/// Signs are discarded, so the result is never negative and an account
/// carrying a balance on its abnormal side inflates the total. The
/// statement builders use [`BucketTotals`] instead; this stays as the
/// plain lookup for ad-hoc queries. Totals saturate at `Amount::MAX`.
pub fn sum_by_prefix(accounts: &[Account], prefix: &str) -> Amount {
    accounts
        .iter()
        .filter(|account| account.code.starts_with(prefix))
        .fold(0, |total: Amount, account| {
            total.saturating_add(account.balance.saturating_abs())
        })
}

/// Sum of normal-side balances of every account whose code starts with
/// `prefix`. Abnormal balances reduce the total.
pub fn signed_sum_by_prefix(accounts: &[Account], prefix: &str) -> Amount {
    accounts
        .iter()
        .filter(|account| account.code.starts_with(prefix))
        .fold(0, |total: Amount, account| total.saturating_add(account.balance))
}

/// Presentation-signed totals per bucket for one account snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketTotals {
    totals: BTreeMap<Bucket, Amount>,
    unclassified_debit: Amount,
    unclassified_credit: Amount,
    warnings: Vec<ReportWarning>,
}

impl BucketTotals {
    /// Classifies each account once and adds its presented balance to its
    /// bucket. Unclassified accounts are split by sign so they still reach
    /// one side of the balance sheet.
    pub fn aggregate(accounts: &[Account]) -> Self {
        let mut out = Self::default();
        for account in accounts {
            let bucket = classify(&account.code);
            if bucket == Bucket::Unclassified {
                let debit = account.debit_balance();
                if debit >= 0 {
                    out.unclassified_debit = out.unclassified_debit.saturating_add(debit);
                } else {
                    out.unclassified_credit = out.unclassified_credit.saturating_sub(debit);
                }
                if account.balance != 0 {
                    out.warnings.push(ReportWarning::UnclassifiedAccount {
                        code: account.code.clone(),
                        name: account.name.clone(),
                        balance: account.balance,
                    });
                }
                continue;
            }
            if account.balance < 0 {
                out.warnings.push(ReportWarning::AbnormalBalance {
                    code: account.code.clone(),
                    name: account.name.clone(),
                    bucket,
                    balance: account.balance,
                });
            }
            let total = out.totals.entry(bucket).or_insert(0);
            *total = total.saturating_add(bucket.presented(account));
        }
        out
    }

    pub fn get(&self, bucket: Bucket) -> Amount {
        self.totals.get(&bucket).copied().unwrap_or(0)
    }

    pub fn sum(&self, buckets: &[Bucket]) -> Amount {
        buckets
            .iter()
            .fold(0, |total: Amount, bucket| total.saturating_add(self.get(*bucket)))
    }

    /// Unclassified debit balances, shown on the actif.
    pub fn unclassified_debit(&self) -> Amount {
        self.unclassified_debit
    }

    /// Unclassified credit balances, shown on the passif.
    pub fn unclassified_credit(&self) -> Amount {
        self.unclassified_credit
    }

    pub fn warnings(&self) -> &[ReportWarning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<Account> {
        vec![
            Account::with_balance("601", "Achats", 400),
            Account::with_balance("6052", "Electricite", -50),
            Account::with_balance("661", "Salaires", 200),
            Account::with_balance("701", "Ventes", 1_000),
        ]
    }

    #[test]
    fn sum_by_prefix_discards_sign() {
        let accounts = accounts();
        assert_eq!(sum_by_prefix(&accounts, "6"), 650);
        assert_eq!(sum_by_prefix(&accounts, "60"), 450);
        assert_eq!(sum_by_prefix(&accounts, "9"), 0);
        assert_eq!(sum_by_prefix(&[], "6"), 0);
    }

    #[test]
    fn signed_sum_keeps_abnormal_balances() {
        let accounts = accounts();
        assert_eq!(signed_sum_by_prefix(&accounts, "60"), 350);
        assert_eq!(signed_sum_by_prefix(&accounts, "7"), 1_000);
    }

    #[test]
    fn abnormal_balances_are_reported() {
        let totals = BucketTotals::aggregate(&accounts());
        assert_eq!(totals.get(Bucket::Achats), 350);
        assert_eq!(
            totals.warnings(),
            &[ReportWarning::AbnormalBalance {
                code: "6052".into(),
                name: "Electricite".into(),
                bucket: Bucket::Achats,
                balance: -50,
            }]
        );
    }

    #[test]
    fn unclassified_accounts_are_split_by_sign() {
        let accounts = vec![
            Account::with_balance("901", "Analytique", 120),
            Account::with_balance("", "Sans code", -30),
            Account::with_balance("902", "Vide", 0),
        ];
        let totals = BucketTotals::aggregate(&accounts);
        assert_eq!(totals.unclassified_debit(), 120);
        assert_eq!(totals.unclassified_credit(), 30);
        assert_eq!(totals.warnings().len(), 2);
        assert_eq!(totals.get(Bucket::Unclassified), 0);
    }

    #[test]
    fn extreme_balances_saturate_instead_of_wrapping() {
        let accounts = vec![
            Account::with_balance("601", "Achats", Amount::MAX),
            Account::with_balance("604", "Fournitures", Amount::MAX),
            Account::with_balance("661", "Salaires", Amount::MIN),
            Account::with_balance("701", "Ventes", Amount::MIN),
            Account::with_balance("901", "Analytique", Amount::MIN),
            Account::with_balance("902", "Analytique bis", Amount::MAX),
            Account::with_balance("903", "Analytique ter", Amount::MAX),
        ];
        assert_eq!(sum_by_prefix(&accounts, "6"), Amount::MAX);
        assert_eq!(sum_by_prefix(&accounts, "66"), Amount::MAX);
        assert_eq!(signed_sum_by_prefix(&accounts, "60"), Amount::MAX);

        let totals = BucketTotals::aggregate(&accounts);
        assert_eq!(totals.get(Bucket::Achats), Amount::MAX);
        assert_eq!(totals.get(Bucket::ChargesPersonnel), Amount::MIN);
        assert_eq!(totals.get(Bucket::ChiffreAffaires), -Amount::MAX);
        assert_eq!(totals.unclassified_debit(), Amount::MAX);
        assert_eq!(totals.unclassified_credit(), Amount::MAX);
        assert_eq!(totals.sum(&[Bucket::Achats, Bucket::Achats]), Amount::MAX);
    }
}
